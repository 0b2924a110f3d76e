//! End-to-end scenarios for the opportunity finder.
//!
//! Every capability is a mock, so these run without network access:
//! 1. Early stop once the result cap is reached
//! 2. Snippet fallback when scraping and fetching both fail
//! 3. Last write wins for URLs seen in several queries
//! 4. Quiet empty result without a search backend
//! 5. Contract errors for missing keywords
//! 6. Bulk contents merged into weak excerpts
//! 7. Drafts sent through a paced provider

use std::sync::Arc;

use backlink_scout::{
    testing::{
        MockContents, MockFetcher, MockScraper, MockSearcher, MockSender, MockTextGenerator,
    },
    ContextSource, DraftRequest, DraftStatus, OpportunityFinder, PageContents, PagePayload,
    QueryMode, ResearchRequest, ScoutError, SearchHit, SendOptions, SendStatus,
};

fn hit(url: &str, title: &str, snippet: &str) -> SearchHit {
    SearchHit::new(url).with_title(title).with_snippet(snippet)
}

/// Scraper that returns markdown with exactly one real email per URL.
fn one_email_scraper() -> MockScraper {
    MockScraper::new().with_page_for_url(|url| {
        let host = url
            .trim_start_matches("https://")
            .split('/')
            .next()
            .unwrap_or_default()
            .to_string();
        PagePayload::Raw(format!(
            "# Write for us\n\nPitch the editors at editor@{host}. Ignore you@example.com."
        ))
    })
}

#[tokio::test]
async fn test_stops_scraping_once_cap_is_reached() {
    let searcher = MockSearcher::new().with_default_results(vec![
        hit("https://alpha.io/write-for-us", "Write for Alpha", "a"),
        hit("https://beta.io/guest-post", "Beta guest posts", "b"),
        hit("https://gamma.io/contribute", "Gamma", "c"),
    ]);
    let scraper = Arc::new(one_email_scraper());
    let finder = OpportunityFinder::new()
        .with_searcher(Arc::new(searcher))
        .with_scraper(scraper.clone());

    let found = finder.find_opportunities("ai tools", 2).await.unwrap();

    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|o| !o.contact_email.is_empty()));
    assert_eq!(found[0].contact_email, "editor@alpha.io");
    assert_eq!(found[1].contact_email, "editor@beta.io");
    assert_eq!(scraper.call_count(), 2);
}

#[tokio::test]
async fn test_snippet_fallback_when_page_sources_fail() {
    let long_snippet = format!("Guest\n posts   welcome. {}", "More detail. ".repeat(80));
    let searcher = MockSearcher::new().with_default_results(vec![
        hit("https://a.com/write", "A", &long_snippet),
        hit("https://b.com/guest", "B", "  Short\tsnippet  "),
    ]);
    let finder = OpportunityFinder::new()
        .with_searcher(Arc::new(searcher))
        .with_scraper(Arc::new(MockScraper::failing()))
        .with_fetcher(Arc::new(MockFetcher::failing()));

    let found = finder.find_opportunities("ai tools", 5).await.unwrap();

    assert_eq!(found.len(), 2);
    for opp in &found {
        assert_eq!(opp.context_source, ContextSource::SearchSnippet);
        assert!(opp.page_excerpt.chars().count() <= 600);
        assert!(!opp.page_excerpt.contains("  "));
    }
    assert!(found[0].page_excerpt.starts_with("Guest posts welcome. More detail."));
    assert_eq!(found[1].page_excerpt, "Short snippet");
}

#[tokio::test]
async fn test_later_query_overwrites_earlier_record() {
    let searcher = MockSearcher::new()
        .with_results(
            "ai tools 'write for us'",
            vec![hit("https://shared.com/write", "First title", "first")],
        )
        .with_results(
            "ai tools 'guest post'",
            vec![hit("https://shared.com/write", "Second title", "second")],
        );
    let finder = OpportunityFinder::new().with_searcher(Arc::new(searcher));

    let found = finder.find_opportunities("ai tools", 10).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title.as_deref(), Some("Second title"));
    assert_eq!(found[0].page_excerpt, "second");
}

#[tokio::test]
async fn test_overwrite_keeps_first_seen_position() {
    let searcher = MockSearcher::new()
        .with_results(
            "ai tools 'write for us'",
            vec![hit("https://one.com", "One", "1"), hit("https://two.com", "Two", "2")],
        )
        .with_results(
            "ai tools 'guest post'",
            vec![hit("https://one.com", "One again", "1b")],
        );
    let finder = OpportunityFinder::new().with_searcher(Arc::new(searcher));

    let found = finder.find_opportunities("ai tools", 10).await.unwrap();
    let urls: Vec<&str> = found.iter().map(|o| o.url.as_str()).collect();

    assert_eq!(urls, vec!["https://one.com", "https://two.com"]);
    assert_eq!(found[0].title.as_deref(), Some("One again"));
}

#[tokio::test]
async fn test_no_backend_is_quiet_empty_result() {
    let scraper = Arc::new(one_email_scraper());
    let finder = OpportunityFinder::new().with_scraper(scraper.clone());

    let found = finder.find_opportunities("ai tools", 10).await.unwrap();

    assert!(found.is_empty());
    assert_eq!(scraper.call_count(), 0);
}

#[tokio::test]
async fn test_extended_mode_backend_runs_extended_batch() {
    let searcher = Arc::new(MockSearcher::new().with_mode(QueryMode::Extended));
    let finder = OpportunityFinder::new().with_searcher(searcher.clone());

    finder.find_opportunities("ai tools", 10).await.unwrap();

    let queries = searcher.queries();
    assert_eq!(queries.len(), 18);
    assert_eq!(queries[0], "ai tools 'write for us'");
}

#[tokio::test]
async fn test_missing_keyword_is_a_contract_error() {
    let finder = OpportunityFinder::new();

    let request = ResearchRequest {
        keyword: Some("   ".to_string()),
        urls: Vec::new(),
        max_results: 5,
    };
    assert!(matches!(
        finder.research(&request).await,
        Err(ScoutError::MissingKeyword)
    ));
}

#[tokio::test]
async fn test_research_then_draft() {
    let searcher = MockSearcher::new()
        .with_default_results(vec![hit("https://alpha.io/write-for-us", "Write for Alpha", "a")]);
    let contents = MockContents::new().with_page(
        "https://alpha.io/write-for-us",
        PageContents {
            highlights: vec!["We pay for guest posts".to_string()],
            ..Default::default()
        },
    );
    let generator = Arc::new(MockTextGenerator::new("Subject: Hello\nHi Alpha editors!"));
    let finder = OpportunityFinder::new()
        .with_searcher(Arc::new(searcher))
        .with_scraper(Arc::new(one_email_scraper()))
        .with_contents_provider(Arc::new(contents))
        .with_generator(generator.clone());

    let found = finder
        .research(&ResearchRequest::for_keyword("ai tools").with_max_results(3))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].highlights, vec!["We pay for guest posts".to_string()]);
    assert_eq!(found[0].notes, "guidelines page, email found");

    let rows = backlink_scout::select_for_outreach(&found, 5);
    let request = DraftRequest {
        subject: "Guest post".to_string(),
        your_name: "Sam".to_string(),
        your_email: "sam@writer.io".to_string(),
        topic: "AI tools".to_string(),
    };
    let drafts = backlink_scout::draft_emails(&rows, finder.generator(), &request).await;

    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].status, DraftStatus::Ok);
    assert_eq!(drafts[0].to_email, "editor@alpha.io");
    assert_eq!(drafts[0].body, "Hi Alpha editors!");
}

#[tokio::test]
async fn test_contents_phase_upgrades_weak_excerpts() {
    let searcher = MockSearcher::new().with_default_results(vec![
        hit("https://a.com/write", "A", "snippet a").with_highlights(vec!["We pay writers".to_string()]),
        hit("https://b.com/guest", "B", "snippet b"),
    ]);
    let contents = Arc::new(MockContents::new().with_page(
        "https://b.com/guest",
        PageContents {
            summary: "Editors   welcome pitches".to_string(),
            text: "Send pitches to editor@b.com".to_string(),
            ..Default::default()
        },
    ));
    let finder = OpportunityFinder::new()
        .with_searcher(Arc::new(searcher))
        .with_scraper(Arc::new(MockScraper::failing()))
        .with_fetcher(Arc::new(MockFetcher::failing()))
        .with_contents_provider(contents.clone());

    let found = finder.find_opportunities("ai tools", 5).await.unwrap();

    assert_eq!(
        contents.requests(),
        vec![vec![
            "https://a.com/write".to_string(),
            "https://b.com/guest".to_string()
        ]]
    );
    assert_eq!(found[0].highlights, vec!["We pay writers".to_string()]);
    assert_eq!(found[0].context_source, ContextSource::SearchSnippet);
    assert_eq!(found[1].context_source, ContextSource::ContentsApi);
    assert_eq!(found[1].page_excerpt, "Editors welcome pitches");
    assert_eq!(found[1].contact_email, "editor@b.com");
}

#[tokio::test]
async fn test_drafts_are_sent_with_one_outcome_per_row() {
    let searcher = MockSearcher::new().with_default_results(vec![
        hit("https://alpha.io/write-for-us", "Write for Alpha", "a"),
        hit("https://beta.io/guest-post", "Beta guest posts", "b"),
    ]);
    let finder = OpportunityFinder::new()
        .with_searcher(Arc::new(searcher))
        .with_scraper(Arc::new(one_email_scraper()))
        .with_generator(Arc::new(MockTextGenerator::new("Hi editors!")));

    let found = finder.find_opportunities("ai tools", 2).await.unwrap();
    let rows = backlink_scout::select_for_outreach(&found, 2);
    let drafts =
        backlink_scout::draft_emails(&rows, finder.generator(), &DraftRequest::default()).await;
    let outgoing: Vec<_> = backlink_scout::outgoing_from_drafts(&drafts)
        .into_iter()
        .map(|mut email| {
            email.subject = "Guest post idea".to_string();
            email
        })
        .collect();

    let sender = MockSender::new().failing_for("editor@beta.io", 429);
    let options = SendOptions {
        rate_limit_per_sec: 100.0,
        dry_run: false,
    };
    let outcomes = backlink_scout::send_bulk(&outgoing, &sender, &options).await;

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].to_email, "editor@alpha.io");
    assert_eq!(outcomes[0].status, SendStatus::Sent);
    assert_eq!(outcomes[1].status, SendStatus::Error);
    assert_eq!(outcomes[1].code, "429");
    assert_eq!(sender.sent()[0].body, "Hi editors!");
}
