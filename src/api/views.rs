//! HTML views rendered from `format!` templates. No template engine; the
//! pages are small static tables around the submission form.

use crate::models::{Movie, Rating, Tag, UserId};

/// Wraps page content in the shared chrome
fn render_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title} - CineMatch</title>
</head>
<body>
<nav><a href="/">Home</a> | <a href="/movies">Movies</a> | <a href="/ratings">Ratings</a> | <a href="/tags">Tags</a></nav>
{content}
</body>
</html>"#
    )
}

/// Minimal text escaping for values interpolated into markup
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn movie_rows(movies: &[&Movie]) -> String {
    movies
        .iter()
        .map(|movie| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                movie.movie_id,
                escape(&movie.title),
                escape(&movie.genres)
            )
        })
        .collect()
}

fn movie_table(movies: &[&Movie]) -> String {
    format!(
        "<table>\n<tr><th>movieId</th><th>title</th><th>genres</th></tr>\n{}</table>",
        movie_rows(movies)
    )
}

/// The root page: submission form, plus the joined recommendations after a
/// successful submission
pub fn index_page(user_id: Option<UserId>, recommended: &[&Movie]) -> String {
    let form = r#"<form method="post" action="/">
<label for="user_id">User id</label>
<input type="text" name="user_id" id="user_id">
<button type="submit">Recommend</button>
</form>"#;

    let results = match user_id {
        Some(user_id) => format!(
            "<h2>Recommendations for user {user_id}</h2>\n{}",
            movie_table(recommended)
        ),
        None => String::new(),
    };

    render_page("Recommendations", &format!("{form}\n{results}"))
}

/// The `/temp_results` page: last recommendation list for the session
pub fn results_page(recommended: &[&Movie]) -> String {
    render_page(
        "Last results",
        &format!("<h2>Last recommendations</h2>\n{}", movie_table(recommended)),
    )
}

/// Full movie-table dump
pub fn movies_page(movies: &[Movie]) -> String {
    let all: Vec<&Movie> = movies.iter().collect();
    render_page("Movies", &movie_table(&all))
}

/// Full rating-table dump
pub fn ratings_page(ratings: &[Rating]) -> String {
    let rows: String = ratings
        .iter()
        .map(|rating| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                rating.user_id, rating.movie_id, rating.rating, rating.timestamp
            )
        })
        .collect();
    let table = format!(
        "<table>\n<tr><th>userId</th><th>movieId</th><th>rating</th><th>timestamp</th></tr>\n{rows}</table>"
    );
    render_page("Ratings", &table)
}

/// Full tag-table dump
pub fn tags_page(tags: &[Tag]) -> String {
    let rows: String = tags
        .iter()
        .map(|tag| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                tag.user_id,
                tag.movie_id,
                escape(&tag.tag),
                tag.timestamp
            )
        })
        .collect();
    let table = format!(
        "<table>\n<tr><th>userId</th><th>movieId</th><th>tag</th><th>timestamp</th></tr>\n{rows}</table>"
    );
    render_page("Tags", &table)
}
