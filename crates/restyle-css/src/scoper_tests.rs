use super::*;

#[test]
fn test_scope_selector_list() {
    let scoped = scope_css("a, .b { color: red; }", ".scope");
    assert_eq!(scoped, ".scope a, .scope .b { color: red; }");
}

#[test]
fn test_scope_compact_rule() {
    assert_eq!(
        scope_css("body{color:red}", ".html-preview"),
        ".html-preview body{color:red}"
    );
}

#[test]
fn test_keyframes_unchanged() {
    let css = "@keyframes spin { from { transform: rotate(0) } to { transform: rotate(360deg) } }";
    assert_eq!(scope_css(css, ".scope"), css);

    let vendor = "@-webkit-keyframes pulse { 0% { opacity: 1 } 100% { opacity: 0 } }";
    assert_eq!(scope_css(vendor, ".scope"), vendor);
}

#[test]
fn test_font_face_unchanged() {
    let css = "@font-face { font-family: X; src: url(/x.woff2); }";
    assert_eq!(scope_css(css, ".scope"), css);
}

#[test]
fn test_media_rules_scoped_recursively() {
    let css = "@media (max-width: 600px) { a { color: red } .b, i { margin: 0 } }";
    assert_eq!(
        scope_css(css, ".scope"),
        "@media (max-width: 600px) { .scope a { color: red } .scope .b, .scope i { margin: 0 } }"
    );
}

#[test]
fn test_supports_rules_scoped() {
    let css = "@supports (display: grid) { .grid { display: grid } }";
    assert_eq!(
        scope_css(css, ".scope"),
        "@supports (display: grid) { .scope .grid { display: grid } }"
    );
}

#[test]
fn test_import_dropped() {
    let css = "@import url(\"theme.css\");\na { color: red }";
    assert_eq!(scope_css(css, ".scope"), "\n.scope a { color: red }");
}

#[test]
fn test_already_scoped_selector_unchanged() {
    let css = ".scope a, b .scope { color: red }";
    assert_eq!(scope_css(css, ".scope"), css);
}

#[test]
fn test_similar_class_is_not_the_container() {
    assert_eq!(
        scope_css(".scoped-list { margin: 0 }", ".scope"),
        ".scope .scoped-list { margin: 0 }"
    );
}

#[test]
fn test_scoping_is_idempotent() {
    let css = "a,.b{color:red}\n@media print { h1 { display: none } }\n@keyframes k { from {} }";
    let once = scope_css(css, ".html-preview");
    let twice = scope_css(&once, ".html-preview");
    assert_eq!(once, twice);
}

#[test]
fn test_comments_preserved_and_ignored() {
    let css = "/* a { } */ p { color: red }";
    assert_eq!(scope_css(css, ".scope"), "/* a { } */ .scope p { color: red }");
}

#[test]
fn test_selector_with_comma_in_function() {
    assert_eq!(
        scope_css(":is(h1, h2) { margin: 0 }", ".scope"),
        ".scope :is(h1, h2) { margin: 0 }"
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(scope_css("", ".scope"), "");
    assert_eq!(CssScoper::new(".scope").container(), ".scope");
}
