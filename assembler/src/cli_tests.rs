//! Tests for CLI parsing and configuration merging.

use super::*;
use crate::config::WheelSection;
use rstest::{fixture, rstest};
use std::path::Path;
use tempfile::TempDir;

fn full_args() -> Vec<&'static str> {
    vec![
        "dynawheel",
        "--name",
        "anamespace.pkg2",
        "--version",
        "1.0.0",
        "--src-root",
        "src",
        "--platform-tag",
        "linux_x86_64",
        "--interpreter-tag",
        "py3.8",
    ]
}

fn configured_wheel() -> WheelConfig {
    WheelConfig {
        wheel: WheelSection {
            name: Some("cfgpkg".to_owned()),
            version: Some("2.0".to_owned()),
            src_root: Some(Utf8PathBuf::from("/cfg/src")),
            platform_tag: Some("win_amd64".to_owned()),
            interpreter_tag: Some("cp311".to_owned()),
            abi_tag: Some("cp311".to_owned()),
            build_tag: Some("7".to_owned()),
            dest_dir: Some(Utf8PathBuf::from("/cfg/dist")),
            pure: Some(true),
            keep_dist_info: Some(true),
        },
        metadata: MetadataSection {
            summary: Some("from config".to_owned()),
            classifiers: vec!["Environment :: Console".to_owned()],
            ..MetadataSection::default()
        },
    }
}

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("temp dir creation succeeds")
}

#[test]
fn cli_parses_defaults() {
    let cli = Cli::parse_from(["dynawheel"]);
    assert!(cli.config.is_none());
    assert!(cli.name.is_none());
    assert!(cli.version.is_none());
    assert!(cli.dest_dir.is_none());
    assert_eq!(cli.pure, None);
    assert_eq!(cli.keep_dist_info, None);
    assert!(cli.classifier.is_empty());
    assert_eq!(cli.verbosity, 0);
}

#[test]
fn cli_parses_repeated_classifiers() {
    let cli = Cli::parse_from([
        "dynawheel",
        "--classifier",
        "Operating System :: POSIX",
        "--classifier",
        "Environment :: Console",
    ]);
    assert_eq!(cli.classifier.len(), 2);
}

#[test]
fn version_flag_is_the_package_version() {
    let cli = Cli::parse_from(["dynawheel", "--version", "1.0.0"]);
    assert_eq!(cli.version.as_deref(), Some("1.0.0"));
}

#[rstest]
#[case::quiet(&["dynawheel"], LevelFilter::Warn)]
#[case::info(&["dynawheel", "-v"], LevelFilter::Info)]
#[case::debug(&["dynawheel", "-vv"], LevelFilter::Debug)]
#[case::more(&["dynawheel", "-vvv"], LevelFilter::Debug)]
fn verbosity_selects_log_level(#[case] args: &[&str], #[case] expected: LevelFilter) {
    let cli = Cli::parse_from(args);
    assert_eq!(cli.log_level(), expected);
}

#[test]
fn flags_alone_build_a_request_with_defaults() {
    let request = Cli::parse_from(full_args())
        .merge(WheelConfig::default())
        .expect("merge succeeds");

    assert_eq!(request.package(), "anamespace.pkg2");
    assert_eq!(request.version(), "1.0.0");
    assert_eq!(request.src_root(), Path::new("src"));
    assert_eq!(request.dest_dir(), Path::new("dist"));
    assert_eq!(request.abi_tag(), "none");
    assert_eq!(request.build_tag(), None);
    assert!(!request.is_pure());
    assert!(request.cleanup_staging());
}

#[test]
fn config_fills_every_field() {
    let request = Cli::parse_from(["dynawheel"])
        .merge(configured_wheel())
        .expect("merge succeeds");

    assert_eq!(
        request.wheel_name().filename(),
        "cfgpkg-2.0-7-cp311-cp311-win_amd64.whl"
    );
    assert_eq!(request.dest_dir(), Path::new("/cfg/dist"));
    assert!(request.is_pure());
    assert!(!request.cleanup_staging());
}

#[test]
fn flags_override_config() {
    let request = Cli::parse_from(full_args())
        .merge(configured_wheel())
        .expect("merge succeeds");

    assert_eq!(request.package(), "anamespace.pkg2");
    assert_eq!(request.platform_tag(), "linux_x86_64");
    assert_eq!(request.src_root(), Path::new("src"));
    // Unset flags fall through to the file.
    assert_eq!(request.abi_tag(), "cp311");
    assert_eq!(request.build_tag(), Some("7"));
}

#[rstest]
#[case::bare_flag("--pure", Some(true))]
#[case::explicit_true("--pure=true", Some(true))]
#[case::explicit_false("--pure=false", Some(false))]
fn pure_flag_accepts_optional_value(#[case] flag: &str, #[case] expected: Option<bool>) {
    let cli = Cli::parse_from(["dynawheel", flag]);
    assert_eq!(cli.pure, expected);
}

#[test]
fn false_flags_override_config_switches() {
    let mut args = full_args();
    args.extend(["--pure=false", "--keep-dist-info=false"]);

    let request = Cli::parse_from(args)
        .merge(configured_wheel())
        .expect("merge succeeds");

    assert!(!request.is_pure());
    assert!(request.cleanup_staging());
}

#[rstest]
#[case::name("--name", "name")]
#[case::version("--version", "version")]
#[case::src_root("--src-root", "src_root")]
#[case::platform_tag("--platform-tag", "platform_tag")]
#[case::interpreter_tag("--interpreter-tag", "interpreter_tag")]
fn missing_required_value_is_reported(#[case] flag: &str, #[case] field: &str) {
    let mut args = full_args();
    let index = args.iter().position(|arg| *arg == flag).expect("flag present");
    args.drain(index..index + 2);

    let err = Cli::parse_from(args)
        .merge(WheelConfig::default())
        .expect_err("field missing");

    assert!(matches!(err, CliError::MissingField(name) if name == field));
}

#[test]
fn rendered_metadata_uses_config_and_flag_summary() {
    let mut args = full_args();
    args.extend(["--summary", "from flags"]);

    let request = Cli::parse_from(args)
        .merge(configured_wheel())
        .expect("merge succeeds");

    let metadata = request.metadata_content();
    assert!(metadata.starts_with("Metadata-Version: 2.1\nName: anamespace.pkg2\nVersion: 1.0.0\n"));
    assert!(metadata.contains("Summary: from flags\n"));
    assert!(metadata.contains("Classifier: Environment :: Console\n"));
    assert!(!metadata.ends_with('\n'));
}

#[test]
fn flag_classifiers_replace_configured_ones() {
    let mut args = full_args();
    args.extend(["--classifier", "Operating System :: POSIX"]);

    let request = Cli::parse_from(args)
        .merge(configured_wheel())
        .expect("merge succeeds");

    let metadata = request.metadata_content();
    assert!(metadata.contains("Classifier: Operating System :: POSIX\n"));
    assert!(!metadata.contains("Environment :: Console"));
}

#[rstest]
fn metadata_file_is_used_verbatim(temp_dir: TempDir) {
    let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("METADATA.in")).expect("utf8 path");
    fs::write(&path, "Metadata-Version: 2.1\nName: hand\n").expect("write");
    let mut args = full_args();
    args.extend(["--metadata-file", path.as_str()]);

    let request = Cli::parse_from(args)
        .merge(WheelConfig::default())
        .expect("merge succeeds");

    assert_eq!(request.metadata_content(), "Metadata-Version: 2.1\nName: hand\n");
}

#[rstest]
fn unreadable_metadata_file_is_reported(temp_dir: TempDir) {
    let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("absent")).expect("utf8 path");
    let mut args = full_args();
    args.extend(["--metadata-file", path.as_str()]);

    let err = Cli::parse_from(args)
        .merge(WheelConfig::default())
        .expect_err("unreadable file");

    assert!(matches!(err, CliError::MetadataFile { .. }));
}

#[rstest]
fn into_request_loads_config_file(temp_dir: TempDir) {
    let dir = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).expect("utf8 path");
    let config = dir.join("dynawheel.toml");
    fs::write(
        &config,
        concat!(
            "[wheel]\n",
            "name = \"demo\"\n",
            "version = \"0.1\"\n",
            "src_root = \"src\"\n",
            "platform_tag = \"any\"\n",
            "interpreter_tag = \"py3\"\n",
        ),
    )
    .expect("write config");

    let request = Cli::parse_from(["dynawheel", "--config", config.as_str()])
        .into_request()
        .expect("request builds");

    assert_eq!(request.src_root(), dir.join("src").as_std_path());
    assert_eq!(request.wheel_name().filename(), "demo-0.1-py3-none-any.whl");
}

#[rstest]
fn into_request_reports_missing_config(temp_dir: TempDir) {
    let path = temp_dir.path().join("absent.toml");
    let path = path.to_str().expect("utf8 path");

    let err = Cli::parse_from(["dynawheel", "--config", path])
        .into_request()
        .expect_err("config missing");

    assert!(matches!(err, CliError::Config(_)));
}
