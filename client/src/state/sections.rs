//! Static table of portal sections and the roles allowed to open them.
//!
//! Page bodies are fixture content; what matters here is that each route has
//! exactly one access policy and the navigation shows the same rules.

#[cfg(test)]
#[path = "sections_test.rs"]
mod sections_test;

use access::{AccessPolicy, Fallback, Role};

/// A gated area of the portal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Profile,
    Recruitment,
    Payroll,
    Compliance,
    Reports,
    Careers,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Profile,
        Section::Recruitment,
        Section::Payroll,
        Section::Compliance,
        Section::Reports,
        Section::Careers,
    ];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Profile => "/profile",
            Self::Recruitment => "/recruitment",
            Self::Payroll => "/payroll",
            Self::Compliance => "/compliance",
            Self::Reports => "/reports",
            Self::Careers => "/careers",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Profile => "My Profile",
            Self::Recruitment => "Recruitment",
            Self::Payroll => "Payroll",
            Self::Compliance => "Compliance",
            Self::Reports => "Reports",
            Self::Careers => "Careers",
        }
    }

    #[must_use]
    pub fn summary(self) -> &'static str {
        match self {
            Self::Profile => "Personal details, leave balance and documents.",
            Self::Recruitment => "Open requisitions, candidate pipeline and interview schedule.",
            Self::Payroll => "Pay runs, deductions and payslip history.",
            Self::Compliance => "Policy acknowledgements, certifications and audit trail.",
            Self::Reports => "Headcount, attrition and team performance reports.",
            Self::Careers => "Open positions at the company.",
        }
    }

    #[must_use]
    pub fn roles(self) -> &'static [Role] {
        match self {
            Self::Profile | Self::Careers => &Role::ALL,
            Self::Recruitment => &[Role::Hr, Role::Manager, Role::Admin],
            Self::Payroll => &[Role::Hr, Role::Admin],
            Self::Compliance => &[Role::Admin, Role::Hr],
            Self::Reports => &[Role::Manager, Role::Admin],
        }
    }

    #[must_use]
    pub fn fallback(self) -> Fallback {
        match self {
            Self::Careers => Fallback::RenderPublic,
            _ => Fallback::RedirectToLogin,
        }
    }

    /// The gate policy for this section. Fails closed to admin-only if the
    /// table is ever left without roles.
    #[must_use]
    pub fn policy(self) -> AccessPolicy {
        AccessPolicy::any_of(self.roles().iter().copied(), self.fallback()).unwrap_or_else(|e| {
            log::error!("section {} has no access policy: {e}", self.title());
            AccessPolicy::allow(Role::Admin)
        })
    }

    /// Summary cards shown on the section page.
    #[must_use]
    pub fn highlights(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Profile => &[("Leave balance", "14 days"), ("Next review", "Mar 2025"), ("Documents", "6")],
            Self::Recruitment => &[("Open requisitions", "12"), ("Candidates in pipeline", "87"), ("Interviews this week", "9")],
            Self::Payroll => &[("Next pay run", "Jan 31"), ("Employees on payroll", "248"), ("Pending adjustments", "4")],
            Self::Compliance => &[("Policies due", "3"), ("Expiring certifications", "11"), ("Open audit items", "2")],
            Self::Reports => &[("Headcount", "248"), ("Attrition (12 mo)", "8.1%"), ("Open positions", "12")],
            Self::Careers => &[("Engineering", "5 openings"), ("Operations", "2 openings"), ("Sales", "3 openings")],
        }
    }
}

/// Sections to list in the navigation for `role`. Without a session only
/// public sections are listed.
#[must_use]
pub fn visible_sections(role: Option<Role>) -> Vec<Section> {
    Section::ALL
        .into_iter()
        .filter(|section| match role {
            Some(role) => section.policy().permits(role),
            None => section.fallback() == Fallback::RenderPublic,
        })
        .collect()
}
