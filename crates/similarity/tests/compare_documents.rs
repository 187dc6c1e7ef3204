use bills_similarity::{
    compare_bills, compare_documents, Classification, SimilarityConfig, SimilarityError,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SECTION: &str = r#"<section><enum>1.</enum><header>Short title</header>
<text>This Act may be cited as the Consumers First Act. The Bureau shall restore
supervision authority over consumer reporting agencies, establish consumer
advisory boards, and report annually regarding enforcement actions taken under
federal consumer financial protection statutes.</text></section>"#;

const UNRELATED: &str = r#"<section><header>Highway funding</header>
<text>Amounts appropriated for surface transportation programs remain available
until expended for bridge replacement, rural roads, and intercity passenger
railway maintenance projects.</text></section>"#;

fn write_doc(root: &Path, name: &str, body: &str) -> PathBuf {
    let path = root.join(name);
    std::fs::write(&path, body).expect("write document");
    path
}

#[tokio::test]
async fn identical_and_unrelated_documents() {
    let temp = TempDir::new().expect("tempdir");
    let a = write_doc(temp.path(), "a.xml", SECTION);
    let b = write_doc(temp.path(), "b.xml", SECTION);
    let c = write_doc(temp.path(), "c.xml", UNRELATED);

    let matrix = compare_documents(&[a, b, c], &SimilarityConfig::default())
        .await
        .expect("compare");

    assert_eq!(matrix.len(), 3);
    let same = matrix.get(0, 1).unwrap();
    assert_eq!(same.score, 1.0);
    assert_eq!(same.reciprocal_score, 1.0);
    assert_eq!(same.explanation, Classification::Identical);

    let apart = matrix.get(0, 2).unwrap();
    assert_eq!(apart.score, 0.0);
    assert_eq!(apart.reciprocal_score, 0.0);
    assert_eq!(apart.explanation, Classification::Unrelated);
    assert_eq!(matrix.get(2, 0).unwrap().explanation, Classification::Unrelated);
}

#[tokio::test]
async fn containment_is_asymmetric() {
    let temp = TempDir::new().expect("tempdir");
    let small = write_doc(temp.path(), "small.xml", SECTION);
    let omnibus =
        format!("{UNRELATED}\n{SECTION}\n{UNRELATED_TWO}\n{UNRELATED_THREE}\n{UNRELATED_TWO}");
    let large = write_doc(temp.path(), "large.xml", &omnibus);

    let matrix = compare_documents(&[small, large], &SimilarityConfig::default())
        .await
        .expect("compare");

    let small_in_large = matrix.get(0, 1).unwrap();
    assert_eq!(small_in_large.score, 1.0);
    assert!(small_in_large.reciprocal_score < 0.2);
    assert_eq!(small_in_large.explanation, Classification::IncorporatedBy);

    let large_in_small = matrix.get(1, 0).unwrap();
    assert_eq!(large_in_small.score, small_in_large.reciprocal_score);
    assert_eq!(large_in_small.explanation, Classification::Incorporates);
}

const UNRELATED_TWO: &str = r#"<section><header>Agricultural research</header>
<text>The Secretary of Agriculture shall award competitive grants supporting
drought resistant seed development, irrigation efficiency studies, soil health
monitoring networks, pollinator habitat restoration, specialty crop marketing,
beginning farmer training cooperatives, regional food processing facilities,
and veterinary services in underserved counties throughout participating
states.</text></section>"#;

const UNRELATED_THREE: &str = r#"<section><header>Veterans housing</header>
<text>The Secretary of Veterans Affairs shall expand supportive housing vouchers,
modernize medical center construction standards, streamline disability claims
adjudication, strengthen suicide prevention outreach, improve caregiver stipends,
accelerate homelessness grants, coordinate transitional employment services,
and publish quarterly accountability dashboards describing program outcomes
nationwide.</text></section>"#;

#[tokio::test]
async fn unreadable_input_aborts_the_batch() {
    let temp = TempDir::new().expect("tempdir");
    let a = write_doc(temp.path(), "a.xml", SECTION);
    let missing = temp.path().join("missing.xml");

    let err = compare_documents(&[a, missing.clone()], &SimilarityConfig::default())
        .await
        .unwrap_err();
    match err {
        SimilarityError::ComparisonInput { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn bills_resolve_to_text_versions() {
    let temp = TempDir::new().expect("tempdir");
    for (dir, body) in [
        ("116/bills/hr/hr1500/text-versions/ih", SECTION),
        ("116/bills/s/s2341/text-versions/is", SECTION),
    ] {
        let dir = temp.path().join(dir);
        std::fs::create_dir_all(&dir).expect("create text version");
        write_doc(&dir, "document.xml", body);
    }

    let bills = vec![
        "116hr1500ih".to_string(),
        "116hr1500".to_string(),
        "116s2341is".to_string(),
    ];
    let matrix = compare_bills(temp.path(), &bills, &SimilarityConfig::default())
        .await
        .expect("compare bills");

    assert_eq!(matrix.labels, vec!["116hr1500ih", "116s2341is"]);
    assert_eq!(matrix.get(0, 1).unwrap().explanation, Classification::Identical);
}
