// End-to-end discovery + analysis over a temporary project tree.
use std::fs;
use std::path::Path;

use vuelens::{FileKind, IndexKey, ScanConfig, SourceScanner, VueAnalyzer};

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn scans_and_analyzes_a_small_project() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("src/main.js"),
        r##"new Vue({el: "#app", data: {count: 0}});"##,
    );
    write(
        &dir.path().join("src/components/Card.vue"),
        "<template>\n  <div class=\"card\"/>\n</template>\n<script>\nexport default { name: \"card\", props: [\"title\"] };\n</script>\n",
    );
    write(
        &dir.path().join("src/components/Plain.vue"),
        "<template><div/></template>\n",
    );
    write(
        &dir.path().join("node_modules/vue/dist/vue.js"),
        "var Vue = {};",
    );
    write(&dir.path().join("notes.txt"), "not a source file");

    let scanner = SourceScanner::new(ScanConfig::default()).unwrap();
    let files = scanner.scan(dir.path()).unwrap();
    assert_eq!(files.len(), 3);

    let mut analyzer = VueAnalyzer::new().unwrap();
    let mut component_names = Vec::new();
    let mut option_bindings = Vec::new();
    for file in &files {
        let analysis = analyzer.analyze_file(file).unwrap();
        for element in &analysis.implicit_elements {
            match element.index_key {
                IndexKey::Components => component_names.push(element.name.clone()),
                IndexKey::Options => option_bindings.push(element.name.clone()),
            }
        }
    }

    assert_eq!(component_names, vec!["card".to_string()]);
    assert_eq!(option_bindings, vec!["#app".to_string()]);
}

#[test]
fn sfc_analysis_reports_whole_file_positions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Badge.vue");
    write(
        &path,
        "<template>\n  <span/>\n</template>\n<script>\nexport default {\n  props: [\"kind\"]\n};\n</script>\n",
    );

    let mut analyzer = VueAnalyzer::new().unwrap();
    let analysis = analyzer.analyze_file(&path).unwrap();
    assert_eq!(analysis.kind, FileKind::SingleFileComponent);
    assert_eq!(analysis.implicit_elements.len(), 1);
    // Fallback name from the file stem; the declaring property sits on line 6.
    assert_eq!(analysis.implicit_elements[0].name, "Badge");
    assert_eq!(analysis.implicit_elements[0].line, 6);
    // The props entry is stub-significant inside a single-file component.
    assert_eq!(analysis.stub_literals.len(), 1);
    assert_eq!(analysis.stub_literals[0].value, "\"kind\"");
    assert_eq!(analysis.stub_literals[0].line, 6);
}
