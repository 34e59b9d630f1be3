mod common;

use common::result_page;
use train_radar::{
    types::ProjectedCoordinate, Config, ConversionError, Projection, RemoteConverter, DEFAULT_MODE,
};
use wiremock::{
    matchers::{body_string, body_string_contains, header, header_regex, method, path},
    Mock, MockServer, ResponseTemplate,
};

const FORM: &str = "/prevody/jtsk.php";
const HTML: &str = "text/html; charset=utf-8";

fn converter(server: &MockServer) -> RemoteConverter {
    let config = Config::default()
        .with_converter_url(&format!("{}{FORM}", server.uri()))
        .unwrap();
    RemoteConverter::from_config(&config).unwrap()
}

async fn serve_page(server: &MockServer, page: &str) {
    Mock::given(method("POST"))
        .and(path(FORM))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page, HTML))
        .mount(server)
        .await;
}

#[tokio::test]
async fn converts_prague_main_station() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FORM))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(header_regex("user-agent", "^train-radar/"))
        .and(body_string("yjtsk=-742600.5&xjtsk=-1043170.25&zbpv=1&jtsk="))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(result_page("φ=50°5'10.5\"N<br>λ=14°25'3.2\"E<br>"), HTML),
        )
        .expect(1)
        .mount(&server)
        .await;

    let position = converter(&server)
        .convert(ProjectedCoordinate::new(-742_600.5, -1_043_170.25).unwrap())
        .await
        .unwrap();

    let (lat, lon) = position.lat_lon();
    assert!((lat - 50.086_25).abs() < 1e-9);
    assert!((lon - (14.0 + 25.0 / 60.0 + 3.2 / 3600.0)).abs() < 1e-9);
}

#[tokio::test]
async fn explicit_mode_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FORM))
        .and(body_string("yjtsk=-598000&xjtsk=-1160000&zbpv=3&jtsk="))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(result_page("φ=49°11'40\"N<br>λ=16°36'29\"E"), HTML),
        )
        .expect(1)
        .mount(&server)
        .await;

    let position = converter(&server)
        .convert_coordinates(-598_000.0, -1_160_000.0, 3)
        .await
        .unwrap();
    assert!(position.latitude().value() > 49.0);
}

#[tokio::test]
async fn configured_mode_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FORM))
        .and(body_string_contains("&zbpv=2&"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(result_page("φ=49°11'40\"N<br>λ=16°36'29\"E"), HTML),
        )
        .expect(1)
        .mount(&server)
        .await;

    let _ = converter(&server)
        .with_mode(2)
        .convert(ProjectedCoordinate::new(-598_000.0, -1_160_000.0).unwrap())
        .await
        .unwrap();
}

#[tokio::test]
async fn layout_change_is_malformed_response() {
    let server = MockServer::start().await;
    serve_page(
        &server,
        "<html><body><p>Formulář je dočasně nedostupný</p></body></html>",
    )
    .await;

    let err = converter(&server)
        .convert_coordinates(-742_600.0, -1_043_170.0, DEFAULT_MODE)
        .await
        .unwrap_err();
    assert!(matches!(err, ConversionError::MalformedResponse(_)));
}

#[tokio::test]
async fn garbage_angles_are_parse_errors() {
    let server = MockServer::start().await;
    serve_page(&server, &result_page("φ=north<br>λ=east")).await;

    let err = converter(&server)
        .convert_coordinates(-742_600.0, -1_043_170.0, DEFAULT_MODE)
        .await
        .unwrap_err();
    assert!(matches!(err, ConversionError::Parse(_)));
}

#[tokio::test]
async fn swapped_hemispheres_are_parse_errors() {
    let server = MockServer::start().await;
    serve_page(&server, &result_page("φ=14°25'3.2\"E<br>λ=50°5'10.5\"N")).await;

    let err = converter(&server)
        .convert_coordinates(-742_600.0, -1_043_170.0, DEFAULT_MODE)
        .await
        .unwrap_err();
    assert!(matches!(err, ConversionError::Parse(_)));
}

#[tokio::test]
async fn server_error_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FORM))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .expect(1)
        .mount(&server)
        .await;

    let err = converter(&server)
        .convert_coordinates(-742_600.0, -1_043_170.0, DEFAULT_MODE)
        .await
        .unwrap_err();
    match err {
        ConversionError::Network(e) => {
            assert_eq!(e.status().map(|s| s.as_u16()), Some(500));
        }
        other => panic!("unexpected error {other:?}"),
    }
}
