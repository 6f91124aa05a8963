//! API integration tests
//!
//! Each test gets its own in-memory SQLite database.

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use bookservice::{
    api,
    config::{AppConfig, DatabaseConfig},
    repository::Repository,
    AppState,
};

/// Helper to build a router over a fresh database
async fn test_app() -> (Router, Repository) {
    let config = AppConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        ..Default::default()
    };

    let repository = Repository::connect(&config.database)
        .await
        .expect("Failed to open test database");

    (api::router(AppState::new(repository.clone())), repository)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    (status, headers, String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8"))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn add_book(
    app: &Router,
    title: &str,
    genres: &str,
    authors: &str,
    year: &str,
) -> (StatusCode, HeaderMap, String) {
    add_book_with_description(app, title, genres, authors, year, "A test description.").await
}

async fn add_book_with_description(
    app: &Router,
    title: &str,
    genres: &str,
    authors: &str,
    year: &str,
    description: &str,
) -> (StatusCode, HeaderMap, String) {
    let body = serde_urlencoded::to_string([
        ("title", title),
        ("genre_title", genres),
        ("author_name", authors),
        ("publ_year", year),
        ("description", description),
    ])
    .expect("Failed to encode form");

    let request = Request::builder()
        .method("POST")
        .uri("/add")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();

    send(app, request).await
}

async fn count(repository: &Repository, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(&repository.pool)
        .await
        .expect("Failed to count rows")
}

#[tokio::test]
async fn test_empty_catalog() {
    let (app, _) = test_app().await;

    let (status, _, body) = send(&app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("The catalog is empty"));
}

#[tokio::test]
async fn test_create_then_get_book() {
    let (app, _) = test_app().await;

    let (status, headers, _) = add_book(&app, "Dune", "Sci-Fi", "Frank Herbert", "1965").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/");

    let (status, _, body) = send(&app, get("/get/Dune/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>Dune</h1>"));
    assert!(body.contains("1965"));
    assert!(body.contains("Frank Herbert"));
    assert!(body.contains("Sci-Fi"));
    assert!(body.contains("A test description."));
}

#[tokio::test]
async fn test_get_book_with_encoded_title() {
    let (app, _) = test_app().await;

    add_book(&app, "The Left Hand of Darkness", "Sci-Fi", "Ursula K. Le Guin", "1969").await;

    let (status, _, body) = send(&app, get("/get/The%20Left%20Hand%20of%20Darkness/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Ursula K. Le Guin"));
}

#[tokio::test]
async fn test_get_unknown_book_is_404() {
    let (app, _) = test_app().await;

    add_book(&app, "Dune", "Sci-Fi", "Frank Herbert", "1965").await;

    let (status, _, body) = send(&app, get("/get/Solaris/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("404"));

    // Title lookup is exact
    let (status, _, _) = send(&app, get("/get/dune/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_title_is_rejected() {
    let (app, repository) = test_app().await;

    let (status, _, _) = add_book(&app, "Dune", "Sci-Fi", "Frank Herbert", "1965").await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (status, _, _) = add_book(&app, "Dune", "Space Opera", "Brian Herbert", "1999").await;
    assert_eq!(status, StatusCode::CONFLICT);

    assert_eq!(count(&repository, "books").await, 1);
    // The rejected request created nothing
    assert_eq!(count(&repository, "genres").await, 1);
    assert_eq!(count(&repository, "authors").await, 1);
    assert_eq!(count(&repository, "author_book").await, 1);
}

#[tokio::test]
async fn test_repeated_genre_in_one_request_is_deduplicated() {
    let (app, repository) = test_app().await;

    let (status, _, _) = add_book(&app, "The Hobbit", "Fantasy, Fantasy", "J. R. R. Tolkien", "1937").await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    assert_eq!(count(&repository, "genres").await, 1);
    assert_eq!(count(&repository, "genre_book").await, 1);

    let book = repository.books_get_by_title("The Hobbit").await.unwrap();
    assert_eq!(book.genres.len(), 1);
    assert_eq!(book.genres[0].name, "Fantasy");
}

#[tokio::test]
async fn test_existing_authors_are_reused() {
    let (app, repository) = test_app().await;

    add_book(&app, "Good Omens", "Fantasy", "Terry Pratchett", "1990").await;
    assert_eq!(count(&repository, "authors").await, 1);

    let (status, _, _) = add_book(
        &app,
        "Anthology",
        "Fantasy",
        "Neil Gaiman, Terry Pratchett ,  Stephen Baxter",
        "2000",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    // Two new authors, three links for the new book
    assert_eq!(count(&repository, "authors").await, 3);
    let book = repository.books_get_by_title("Anthology").await.unwrap();
    let mut names: Vec<_> = book.authors.iter().map(|a| a.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["Neil Gaiman", "Stephen Baxter", "Terry Pratchett"]);

    // The genre was reused as well
    assert_eq!(count(&repository, "genres").await, 1);
}

#[tokio::test]
async fn test_names_match_case_sensitively() {
    let (app, repository) = test_app().await;

    add_book(&app, "First", "Horror", "Poe", "1840").await;
    add_book(&app, "Second", "horror", "Poe", "1841").await;

    assert_eq!(count(&repository, "genres").await, 2);
    assert_eq!(count(&repository, "authors").await, 1);
}

#[tokio::test]
async fn test_empty_names_are_kept() {
    let (app, repository) = test_app().await;

    let (status, _, _) = add_book(&app, "Untitled", "", "", "2001").await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let book = repository.books_get_by_title("Untitled").await.unwrap();
    assert_eq!(book.genres.len(), 1);
    assert_eq!(book.genres[0].name, "");
    assert_eq!(book.authors.len(), 1);
    assert_eq!(book.authors[0].name, "");
}

#[tokio::test]
async fn test_invalid_year_writes_nothing() {
    let (app, repository) = test_app().await;

    let (status, _, body) = add_book(&app, "Dune", "Sci-Fi", "Frank Herbert", "nineteen").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid publication year"));

    assert_eq!(count(&repository, "books").await, 0);
    assert_eq!(count(&repository, "genres").await, 0);
    assert_eq!(count(&repository, "authors").await, 0);
}

#[tokio::test]
async fn test_year_beyond_32_bits_is_stored() {
    let (app, repository) = test_app().await;

    let (status, _, _) = add_book(&app, "Far Future", "Sci-Fi", "Olaf Stapledon", "3000000000").await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let book = repository.books_get_by_title("Far Future").await.unwrap();
    assert_eq!(book.publ_year, Some(3_000_000_000));

    let (status, _, body) = send(&app, get("/get/Far%20Future/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("3000000000"));
}

#[tokio::test]
async fn test_empty_description_is_stored_as_submitted() {
    let (app, repository) = test_app().await;

    let (status, _, _) = add_book_with_description(&app, "Blank", "Drama", "Anonymous", "1900", "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let book = repository.books_get_by_title("Blank").await.unwrap();
    assert_eq!(book.description.as_deref(), Some(""));

    let nulls: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE description IS NULL")
        .fetch_one(&repository.pool)
        .await
        .unwrap();
    assert_eq!(nulls, 0);
}

#[tokio::test]
async fn test_listing_shows_all_books() {
    let (app, repository) = test_app().await;

    let titles = ["Dune", "Hyperion", "Solaris"];
    for (i, title) in titles.iter().enumerate() {
        let year = (1960 + i).to_string();
        let (status, _, _) = add_book(&app, title, "Sci-Fi", "Various", &year).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
    }

    let (status, _, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    for title in titles {
        assert!(body.contains(&format!("/get/{}/", title)), "missing {}", title);
    }

    let books = repository.books_list().await.unwrap();
    assert_eq!(books.len(), titles.len());
    assert!(books.iter().all(|b| b.authors.len() == 1 && b.genres.len() == 1));
}

#[tokio::test]
async fn test_author_listing() {
    let (app, _) = test_app().await;

    add_book(&app, "Dune", "Sci-Fi", "Frank Herbert", "1965").await;
    add_book(&app, "Dune Messiah", "Sci-Fi", "Frank Herbert", "1969").await;

    let (status, _, body) = send(&app, get("/author/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("<strong>Frank Herbert</strong>").count(), 1);
    assert!(body.contains("Dune Messiah"));
}

#[tokio::test]
async fn test_static_pages() {
    let (app, _) = test_app().await;

    let (status, _, body) = send(&app, get("/instruction/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("How to use the catalog"));

    let (status, _, body) = send(&app, get("/add")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("name=\"genre_title\""));
}

#[tokio::test]
async fn test_missing_trailing_slash_redirects() {
    let (app, _) = test_app().await;

    let (status, headers, _) = send(&app, get("/instruction")).await;
    assert_eq!(status, StatusCode::PERMANENT_REDIRECT);
    assert_eq!(headers[header::LOCATION], "/instruction/");

    let (status, headers, _) = send(&app, get("/get/The%20Hobbit")).await;
    assert_eq!(status, StatusCode::PERMANENT_REDIRECT);
    assert_eq!(headers[header::LOCATION], "/get/The%20Hobbit/");
}

#[tokio::test]
async fn test_health_and_openapi() {
    let (app, _) = test_app().await;

    let (status, _, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("healthy"));

    let (status, _, body) = send(&app, get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ready"));

    let (status, _, body) = send(&app, get("/api-docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("BookSchema"));
    assert!(body.contains("/get/{title}/"));
}

#[tokio::test]
async fn test_end_to_end_over_tcp() {
    let (app, _) = test_app().await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let response = client
        .post(format!("http://{}/add", addr))
        .form(&[
            ("title", "Neuromancer"),
            ("genre_title", "Cyberpunk"),
            ("author_name", "William Gibson"),
            ("publ_year", "1984"),
            ("description", "The sky above the port."),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 303);
    assert_eq!(response.headers()["location"], "/");

    let response = client
        .get(format!("http://{}/get/Neuromancer/", addr))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("William Gibson"));
    assert!(body.contains("Cyberpunk"));
}
