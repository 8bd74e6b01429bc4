use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};
use wp_bulk_core::{RecordId, RunConfig, SlugResolver};

#[tokio::test]
async fn resolves_known_slugs_in_input_order() {
    let server = MockServer::start().await;
    for (slug, id) in [("alpha", 11), ("gamma", 33)] {
        Mock::given(method("GET"))
            .and(path("/wp-json/wp/v2/posts"))
            .and(query_param("slug", slug))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": id, "slug": slug}])),
            )
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/posts"))
        .and(query_param("slug", "beta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/posts"))
        .and(query_param("slug", "delta"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = RunConfig::new(&format!("{}/wp-json/wp/v2/posts", server.uri()), "slugs.jsonl")
        .unwrap()
        .with_pool_size(2)
        .with_batch_size(3);
    let resolver = SlugResolver::new(&config).unwrap();

    let slugs: Vec<String> = ["alpha", "beta", "gamma", "delta"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let mut batches = 0;
    let resolved = resolver.run(&slugs, |_| batches += 1).await;

    assert_eq!(batches, 2);
    let pairs: Vec<(String, RecordId)> = resolved.into_iter().map(|r| (r.slug, r.id)).collect();
    assert_eq!(
        pairs,
        vec![
            ("alpha".to_string(), RecordId::Int(11)),
            ("gamma".to_string(), RecordId::Int(33)),
        ]
    );
}
