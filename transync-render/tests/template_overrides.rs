use std::fs;

use tempfile::TempDir;
use transync_core::Dialect;
use transync_render::{preamble_name, BannerContext, TemplateEngine};

fn ctx() -> BannerContext {
    BannerContext::new("js/test/base/functions/test.datetime.js")
}

#[test]
fn user_override_replaces_embedded_preamble() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir_all(dir.path().join("preamble")).expect("mkdir");
    fs::write(
        dir.path().join("preamble").join("python.tera"),
        "# custom preamble for {{ source }}\n",
    )
    .expect("write override");

    let engine = TemplateEngine::with_overrides(Some(dir.path())).expect("engine");
    let out = engine
        .render(preamble_name(Dialect::Python3), &ctx())
        .expect("render");
    assert_eq!(out, "# custom preamble for js/test/base/functions/test.datetime.js\n");

    // Templates without an override still come from the embedded set.
    let php = engine.render(preamble_name(Dialect::Php), &ctx()).expect("render");
    assert!(php.starts_with("<?php"));
}

#[test]
fn override_names_are_case_insensitive() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir_all(dir.path().join("Header")).expect("mkdir");
    fs::write(dir.path().join("Header").join("Crypto.PY.tera"), "shim\n").expect("write");

    let engine = TemplateEngine::with_overrides(Some(dir.path())).expect("engine");
    let out = engine.render("header/crypto.py.tera", &ctx()).expect("render");
    assert_eq!(out, "shim\n");
}

#[test]
fn non_tera_files_in_override_dir_are_ignored() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("README.md"), "{{ broken").expect("write");

    TemplateEngine::with_overrides(Some(dir.path())).expect("engine ignores README.md");
}

#[test]
fn missing_override_dir_falls_back_to_embedded() {
    let dir = TempDir::new().expect("tempdir");
    let engine =
        TemplateEngine::with_overrides(Some(&dir.path().join("absent"))).expect("engine");
    let banner = engine
        .render_banner(Dialect::Python2, Some("header/datetime.py.tera"), &ctx())
        .expect("render");
    assert!(banner.contains("from ccxt.base.decimal_to_precision import ROUND_UP, ROUND_DOWN"));
}

#[test]
fn broken_override_is_reported() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir_all(dir.path().join("preamble")).expect("mkdir");
    fs::write(dir.path().join("preamble").join("php.tera"), "{{ unclosed").expect("write");

    assert!(TemplateEngine::with_overrides(Some(dir.path())).is_err());
}
