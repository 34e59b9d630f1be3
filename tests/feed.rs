mod common;

use common::result_page;
use train_radar::{
    filter_trains, Config, DetailView, FeedClient, FeedError, RefreshOutcome, RemoteConverter,
    TrainSource,
};
use wiremock::{
    matchers::{body_string_contains, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const JSON: &str = "application/json";

const FEED: &str = r#"{
    "success": true,
    "result": [
        {
            "id": "OsVlak-2104",
            "properties": {"fn": "Praha hl.n.", "ln": "Beroun", "na": "", "tt": "Os", "tn": "2104",
                           "pde": "4 min", "cp": "10:05", "cr": "10:52"},
            "geometry": {"type": "Point", "coordinates": [-742600.5, -1043170.25]}
        },
        {
            "id": "R-680",
            "properties": {"fn": "Brno hl.n.", "ln": "Jihlava", "na": "Vysočina", "tt": "R", "tn": "680",
                           "pde": "35 min", "cp": "11:20", "cr": "12:44"},
            "geometry": {"type": "Point", "coordinates": [-598000, -1160000]}
        },
        {
            "id": "Sp-1790",
            "properties": {"fn": "Kolín", "ln": "Havlíčkův Brod", "tt": "Sp", "tn": "1790"},
            "geometry": null
        }
    ]
}"#;

const FEED_PATH: &str = "/serverside/request2.php";

fn feed(server: &MockServer) -> FeedClient {
    let config = Config::default()
        .with_feed_url(&format!("{}{FEED_PATH}?action=load", server.uri()))
        .unwrap();
    FeedClient::from_config(&config).unwrap()
}

async fn serve_feed(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .and(query_param("action", "load"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn loads_and_filters() {
    let server = MockServer::start().await;
    serve_feed(&server, ResponseTemplate::new(200).set_body_raw(FEED, JSON)).await;

    let trains = feed(&server).fetch_trains().await.unwrap();
    assert_eq!(trains.len(), 3);

    let found = filter_trains(&trains, "brno");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "R-680");
    assert_eq!(found[0].delay_minutes(), 35);

    let found = filter_trains(&trains, "kolín");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "Sp-1790");
    assert!(found[0].projected().is_err());

    assert_eq!(filter_trains(&trains, "").len(), 3);
    assert!(filter_trains(&trains, "Ostrava").is_empty());
}

#[tokio::test]
async fn no_success() {
    let server = MockServer::start().await;
    serve_feed(
        &server,
        ResponseTemplate::new(200).set_body_raw(r#"{"success": false, "result": []}"#, JSON),
    )
    .await;

    let err = feed(&server).fetch_trains().await.unwrap_err();
    assert!(matches!(err, FeedError::Unavailable));
}

#[tokio::test]
async fn not_json() {
    let server = MockServer::start().await;
    serve_feed(
        &server,
        ResponseTemplate::new(200).set_body_raw("<html>maintenance</html>", "text/html"),
    )
    .await;

    let err = feed(&server).fetch_trains().await.unwrap_err();
    assert!(matches!(err, FeedError::Decode(_)));
}

#[tokio::test]
async fn unavailable_endpoint() {
    let server = MockServer::start().await;
    serve_feed(&server, ResponseTemplate::new(503)).await;

    let err = feed(&server).trains().await.unwrap_err();
    assert!(matches!(err, FeedError::Network(_)));
}

#[tokio::test]
async fn detail_of_a_running_train() {
    let server = MockServer::start().await;
    serve_feed(&server, ResponseTemplate::new(200).set_body_raw(FEED, JSON)).await;
    Mock::given(method("POST"))
        .and(path("/prevody/jtsk.php"))
        .and(body_string_contains("yjtsk=-742600.5&xjtsk=-1043170.25&"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            result_page("φ=50°5'10.5\"N<br>λ=14°25'3.2\"E"),
            "text/html; charset=utf-8",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config::default()
        .with_feed_url(&format!("{}{FEED_PATH}?action=load", server.uri()))
        .unwrap()
        .with_converter_url(&format!("{}/prevody/jtsk.php", server.uri()))
        .unwrap();
    let source = FeedClient::from_config(&config).unwrap();
    let converter = RemoteConverter::from_config(&config).unwrap();

    let mut view = DetailView::new("OsVlak-2104");
    let outcome = view.refresh(&source, &converter).await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Updated);

    let text = view.to_string();
    assert!(text.starts_with("Os 2104\n"));
    assert!(text.contains("Delay: 4 min [slight]"));
    assert!(text.contains("Map: https://www.openstreetmap.org/?mlat=50.086250&mlon=14.417556"));
}

#[tokio::test]
async fn detail_of_a_train_without_a_point() {
    let server = MockServer::start().await;
    serve_feed(&server, ResponseTemplate::new(200).set_body_raw(FEED, JSON)).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = Config::default()
        .with_feed_url(&format!("{}{FEED_PATH}?action=load", server.uri()))
        .unwrap()
        .with_converter_url(&format!("{}/prevody/jtsk.php", server.uri()))
        .unwrap();
    let source = FeedClient::from_config(&config).unwrap();
    let converter = RemoteConverter::from_config(&config).unwrap();

    let mut view = DetailView::new("Sp-1790");
    let outcome = view.refresh(&source, &converter).await.unwrap();

    assert_eq!(outcome, RefreshOutcome::PositionUnknown);
    assert!(view.to_string().ends_with("Position: unknown"));
}
