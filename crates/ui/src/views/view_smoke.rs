use super::test_harness::{ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_lists_every_page() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness.drive_async().await;
    let html = harness.render();

    for title in ["Machine Learning Pipeline", "Prompt Framework", "Token Explorer"] {
        assert!(html.contains(title), "missing {title} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn ml_view_smoke_renders_hero_and_empty_notes() {
    let mut harness = setup_view_harness(ViewKind::Ml);
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("How Machines Learn"), "missing hero in {html}");
    assert!(html.contains("Session Notes"), "missing log panel in {html}");
    assert!(
        html.contains("Your guide&#39;s notes will appear here.")
            || html.contains("Your guide's notes will appear here."),
        "missing log placeholder in {html}"
    );
    assert!(!html.contains("view-pipeline"), "inactive view rendered in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn prompt_view_smoke_starts_on_framework_view() {
    let mut harness = setup_view_harness(ViewKind::Prompt);
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("The Prompt Framework"), "missing hero in {html}");
    for node in ["Role", "Task", "Context", "Constraints", "Format"] {
        assert!(html.contains(node), "missing node {node} in {html}");
    }
    assert!(html.contains("btn-hero-next"), "missing next control in {html}");
    assert!(html.contains("hidden"), "next control should start hidden in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn token_view_smoke_renders_sentence_before_tokenizing() {
    let mut harness = setup_view_harness(ViewKind::Token);
    harness.drive_async().await;
    let html = harness.render();

    assert!(
        html.contains("Machine learning makes computers smart."),
        "missing raw text in {html}"
    );
    assert!(!html.contains("token-block"), "tokens rendered too early in {html}");
}
