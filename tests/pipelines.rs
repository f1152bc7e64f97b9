use std::fs;
use std::path::Path;

use newsnorm::pipelines::{
    EmbeddedPipeline, Pipeline, StreamPipeline, TablePipeline, TaggedPipeline,
};

fn chunk_names(dst: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dst)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}

#[test_log::test]
fn tagged_export_end_to_end() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();

    for (name, headline, body) in [
        ("a1", "Ensimmäinen uutinen", "<p>Runko yksi</p>"),
        ("a2", "Toinen uutinen", "<p>Runko kaksi</p>"),
    ] {
        fs::write(
            src.path().join(format!("{}.xml", name)),
            format!(
                "<contentMeta>\n<headline>{}</headline>\n</contentMeta>\n\
                 <html>\n{}\n</html>\n",
                headline, body
            ),
        )
        .unwrap();
    }

    TaggedPipeline::new(
        vec![src.path().to_path_buf()],
        dst.path().to_path_buf(),
        5000,
        1,
    )
    .run()
    .unwrap();

    assert_eq!(chunk_names(dst.path()), vec!["chunk-0-0.txt"]);
    let content = fs::read_to_string(dst.path().join("chunk-0-0.txt")).unwrap();
    assert_eq!(
        content,
        "###C: a1_title\nEnsimmäinen uutinen\n\n###C: a1_body\nRunko yksi\n\n\
         ###C: a2_title\nToinen uutinen\n\n###C: a2_body\nRunko kaksi\n\n"
    );
}

#[test_log::test]
fn tagged_partitions_write_disjoint_chunks() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();

    for i in 0..4 {
        fs::write(
            src.path().join(format!("n{}.xml", i)),
            format!(
                "<contentMeta>\n<headline>Otsikko {}</headline>\n</contentMeta>\n\
                 <html>\n<p>Teksti {}</p>\n</html>\n",
                i, i
            ),
        )
        .unwrap();
    }

    TaggedPipeline::new(
        vec![src.path().to_path_buf()],
        dst.path().to_path_buf(),
        1,
        2,
    )
    .run()
    .unwrap();

    // two partitions of two files each, one chunk per article
    assert_eq!(
        chunk_names(dst.path()),
        vec![
            "chunk-0-0.txt",
            "chunk-0-1.txt",
            "chunk-1-0.txt",
            "chunk-1-1.txt"
        ]
    );
}

#[test_log::test]
fn embedded_export_skips_broken_records() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();

    let article = r#"{"article_id":5,"title":"Otsikko","lead":"Kärki","body":[{"type":"paragraph","text":"Kappale"}]}"#;
    fs::write(
        src.path().join("5.html"),
        format!(
            "<html><body><script>x={},\"lastUpdated\":1570000000}}}},\"authorInfo\":{{}}</script></body></html>",
            article
        ),
    )
    .unwrap();
    fs::write(src.path().join("broken.html"), "<html>nothing embedded</html>").unwrap();

    EmbeddedPipeline::new(
        vec![src.path().to_path_buf()],
        dst.path().to_path_buf(),
        5000,
        1,
    )
    .run()
    .unwrap();

    let content = fs::read_to_string(dst.path().join("chunk-0-0.txt")).unwrap();
    assert_eq!(
        content,
        "###C: 5.html_title\nOtsikko\n\n###C: 5.html_ingress\nKärki\n\n###C: 5.html_body\nKappale\n\n"
    );
}

#[test_log::test]
fn stream_export_writes_fragment_records() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();

    fs::write(
        src.path().join("export.json"),
        r#"{"data": [
            {"id": "3-1", "headline": {"full": "Yksi"}, "lead": "Alku",
             "content": [{"text": "<p>Eka</p>"}, {"image": true}, {"text": "Toka"}]},
            {"id": "3-2", "content": [{"text": "Vain runko"}]}
        ]}"#,
    )
    .unwrap();

    StreamPipeline::new(vec![src.path().to_path_buf()], dst.path().to_path_buf(), 5000)
        .run()
        .unwrap();

    let content = fs::read_to_string(dst.path().join("chunk-0.txt")).unwrap();
    assert_eq!(
        content,
        "###C: 3-1_title\nYksi\n\n###C: 3-1_ingress\nAlku\n\n\
         ###C: 3-1_body_0\nEka\n\n###C: 3-1_body_2\nToka\n\n\
         ###C: 3-2_body_0\nVain runko\n\n"
    );
}

#[test_log::test]
fn table_export_end_to_end() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();

    let csv_path = src.path().join("assets.csv");
    fs::write(
        &csv_path,
        "id,resourcetype,startdate,modifieddate,title,data,custom,timestamp,nodeid,body,splitbody\n\
         10,article,,,<b>Otsikko</b>,\"{\"\"ingress\"\":\"\"Kärki\"\"}\",,,,<p>Runko</p>,\n\
         11,image,,,kuva,\"{\"\"ingress\"\":\"\"\"\"}\",,,,,\n",
    )
    .unwrap();

    TablePipeline::new(csv_path, dst.path().to_path_buf(), 5000)
        .run()
        .unwrap();

    let content = fs::read_to_string(dst.path().join("chunk-0.txt")).unwrap();
    assert_eq!(
        content,
        "###C: 10_title\nOtsikko\n\n###C: 10_ingress\nKärki\n\n###C: 10_body\nRunko\n\n"
    );
}
