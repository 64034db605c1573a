use super::*;
use crate::manifest::Dependency;

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, body).expect("write");
}

fn dep(name: &str, files: &[&str], dest: Option<&str>) -> Dependency {
    Dependency { name: name.to_owned(), files: files.iter().map(|f| (*f).to_owned()).collect(), dest: dest.map(str::to_owned) }
}

struct Fixture {
    _dir: tempfile::TempDir,
    source: PathBuf,
    target: PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = dir.path().join("node_modules");
    let target = dir.path().join("libs");
    write(&source, "osd/build/openseadragon.min.js", "osd");
    write(&source, "osd/build/images/home.png", "png");
    write(&source, "osd/README.md", "readme");
    write(&source, "swiper/dist/swiper.css", "css");
    write(&source, "swiper/dist/themes/dark.css", "dark");
    Fixture { _dir: dir, source, target }
}

fn manifest(fx: &Fixture, dependencies: Vec<Dependency>) -> Manifest {
    Manifest { source_root: fx.source.clone(), target_root: fx.target.clone(), dependencies }
}

fn targets(plan: &CopyPlan, fx: &Fixture) -> Vec<String> {
    let mut out: Vec<String> = plan
        .entries
        .iter()
        .map(|e| e.target.strip_prefix(&fx.target).expect("under target").to_string_lossy().replace('\\', "/"))
        .collect();
    out.sort();
    out
}

// =============================================================
// literal_prefix
// =============================================================

#[test]
fn prefix_stops_at_first_wildcard() {
    assert_eq!(literal_prefix("swiper/dist/**/*.css"), PathBuf::from("swiper/dist"));
    assert_eq!(literal_prefix("a/b?/c"), PathBuf::from("a"));
    assert_eq!(literal_prefix("*.js"), PathBuf::new());
}

#[test]
fn prefix_of_literal_path_is_parent() {
    assert_eq!(literal_prefix("osd/build/openseadragon.min.js"), PathBuf::from("osd/build"));
    assert_eq!(literal_prefix("./file.js"), PathBuf::new());
}

// =============================================================
// build
// =============================================================

#[test]
fn plan_preserves_paths_below_literal_prefix() {
    let fx = fixture();
    let plan = build(&manifest(&fx, vec![dep("swiper", &["swiper/dist/**/*.css"], None)])).expect("plan");
    assert_eq!(targets(&plan, &fx), vec!["swiper/swiper.css", "swiper/themes/dark.css"]);
    assert!(plan.unmatched.is_empty());
}

#[test]
fn matched_directories_are_copied_recursively() {
    let fx = fixture();
    let plan = build(&manifest(&fx, vec![dep("osd", &["osd/build/*"], Some("openseadragon"))])).expect("plan");
    assert_eq!(targets(&plan, &fx), vec!["openseadragon/images/home.png", "openseadragon/openseadragon.min.js"]);
}

#[test]
fn literal_file_keeps_its_name() {
    let fx = fixture();
    let plan = build(&manifest(&fx, vec![dep("osd", &["osd/README.md"], None)])).expect("plan");
    assert_eq!(targets(&plan, &fx), vec!["osd/README.md"]);
}

#[test]
fn overlapping_patterns_copy_once() {
    let fx = fixture();
    let plan = build(&manifest(&fx, vec![dep("swiper", &["swiper/dist/*.css", "swiper/dist/swiper.css"], None)]))
        .expect("plan");
    assert_eq!(plan.entries.len(), 1);
    assert!(plan.unmatched.is_empty());
}

#[test]
fn empty_patterns_are_reported() {
    let fx = fixture();
    let plan = build(&manifest(&fx, vec![dep("missing", &["nothing/*.js"], None)])).expect("plan");
    assert!(plan.entries.is_empty());
    assert_eq!(plan.unmatched, vec![Unmatched { dependency: "missing".into(), pattern: "nothing/*.js".into() }]);
    assert!(matches!(plan.check(), Err(AssetError::Unmatched { count: 1 })));
}

#[test]
fn malformed_pattern_is_an_error() {
    let fx = fixture();
    let err = build(&manifest(&fx, vec![dep("bad", &["osd/[*"], None)])).expect_err("bad pattern");
    assert!(matches!(err, AssetError::Pattern { .. }));
}

// =============================================================
// execute
// =============================================================

#[test]
fn copy_writes_files() {
    let fx = fixture();
    let plan = build(&manifest(&fx, vec![dep("swiper", &["swiper/dist/**/*.css"], None)])).expect("plan");
    let stats = execute(&plan, CopyOptions::default()).expect("copy");
    assert_eq!(stats.copied, 2);
    assert_eq!(stats.bytes, 7);
    assert_eq!(fs::read_to_string(fx.target.join("swiper/themes/dark.css")).expect("read"), "dark");
}

#[test]
fn dry_run_touches_nothing() {
    let fx = fixture();
    write(&fx.target, "osd/stale.js", "old");
    let plan = build(&manifest(&fx, vec![dep("osd", &["osd/README.md"], None)])).expect("plan");
    let stats = execute(&plan, CopyOptions { dry_run: true, clean: true }).expect("dry run");
    assert_eq!(stats, CopyStats { copied: 1, bytes: 0, cleaned: 1 });
    assert!(fx.target.join("osd/stale.js").exists());
    assert!(!fx.target.join("osd/README.md").exists());
}

#[test]
fn clean_removes_stale_files() {
    let fx = fixture();
    write(&fx.target, "osd/stale.js", "old");
    let plan = build(&manifest(&fx, vec![dep("osd", &["osd/README.md"], None)])).expect("plan");
    let stats = execute(&plan, CopyOptions { dry_run: false, clean: true }).expect("copy");
    assert_eq!(stats.cleaned, 1);
    assert!(!fx.target.join("osd/stale.js").exists());
    assert!(fx.target.join("osd/README.md").exists());
}
