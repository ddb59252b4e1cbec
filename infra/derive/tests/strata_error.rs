#[test]
fn strata_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/strata_error_pass.rs");
}
