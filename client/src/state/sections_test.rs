use std::collections::HashSet;

use super::*;

#[test]
fn every_section_has_roles_and_unique_path() {
    let mut paths = HashSet::new();
    for section in Section::ALL {
        assert!(!section.roles().is_empty(), "{section:?} has no roles");
        assert!(paths.insert(section.path()), "duplicate path {}", section.path());
        assert!(section.path().starts_with('/'));
    }
}

#[test]
fn policy_matches_role_table() {
    for section in Section::ALL {
        assert_eq!(section.policy().allowed_roles(), section.roles());
        assert_eq!(section.policy().fallback(), section.fallback());
    }
}

#[test]
fn only_careers_is_public() {
    let public: Vec<_> = Section::ALL
        .into_iter()
        .filter(|s| s.fallback() == Fallback::RenderPublic)
        .collect();
    assert_eq!(public, vec![Section::Careers]);
}

#[test]
fn admin_sees_every_section() {
    assert_eq!(visible_sections(Some(Role::Admin)), Section::ALL.to_vec());
}

#[test]
fn employee_sees_self_service_only() {
    assert_eq!(visible_sections(Some(Role::Employee)), vec![Section::Profile, Section::Careers]);
}

#[test]
fn anonymous_visitor_sees_public_sections() {
    assert_eq!(visible_sections(None), vec![Section::Careers]);
}

#[test]
fn payroll_is_limited_to_hr_and_admin() {
    let policy = Section::Payroll.policy();
    assert!(policy.permits(Role::Hr));
    assert!(policy.permits(Role::Admin));
    assert!(!policy.permits(Role::Manager));
    assert!(!policy.permits(Role::Employee));
}
