use integration_tests::harness::TestSite;
use pretty_assertions::assert_eq;
use wpgate_core::environment::Platform;

#[test]
fn lambda_setup_creates_scratch_directories() {
    let scratch = tempfile::tempdir().unwrap();
    let uploads = scratch.path().join("uploads");
    let cache = scratch.path().join("cache/nested");
    let site = TestSite::wordpress().config(&format!(
        "lambda {{\n  enabled = true\n  directories = [\"{}\", \"{}\"]\n}}",
        uploads.display(),
        cache.display()
    ));
    let router = site.router();

    router.get("/");

    assert_eq!(router.pipeline().environment().platform(), Platform::Lambda);
    assert!(uploads.is_dir());
    assert!(cache.is_dir());
}

#[test]
fn standard_platform_touches_nothing() {
    let site = TestSite::wordpress();
    let router = site.router();

    router.get("/");

    assert_eq!(router.pipeline().environment().platform(), Platform::Standard);
    assert!(router.pipeline().environment().info().lambda.is_none());
}
