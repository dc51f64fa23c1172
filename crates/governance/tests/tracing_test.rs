use clinic_core::Error;
use clinic_governance::configure_tracing;

#[test]
fn test_configure_tracing_installs_once() {
    configure_tracing(true).expect("first install should succeed");
    tracing::info!(component = "governance_test", "subscriber installed");

    let second = configure_tracing(false);
    assert!(matches!(second, Err(Error::Governance(_))));
}
