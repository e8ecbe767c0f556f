use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use popcorn_core::{format_two_decimals, WatchedSummary};
use popcorn_models::{sanitize_poster, MovieDetail, SearchResultItem, WatchedEntry};

fn styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

pub fn results_table(results: &[SearchResultItem]) -> Table {
    let mut table = styled_table(&["#", "Title", "Year", "IMDb ID"]);
    for (i, item) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&item.title),
            Cell::new(&item.year),
            Cell::new(&item.imdb_id),
        ]);
    }
    table
}

pub fn watched_table(entries: &[WatchedEntry]) -> Table {
    let mut table = styled_table(&["Title", "Year", "IMDb", "Yours", "Runtime", "IMDb ID"]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.title),
            Cell::new(&entry.year),
            Cell::new(entry.imdb_rating.map(|r| r.to_string()).unwrap_or_else(|| "N/A".to_string())),
            Cell::new(entry.user_rating),
            Cell::new(entry.runtime.map(|m| format!("{} min", m)).unwrap_or_else(|| "N/A".to_string())),
            Cell::new(&entry.imdb_id),
        ]);
    }
    table
}

pub fn summary_line(summary: &WatchedSummary) -> String {
    format!(
        "#️⃣ {} movies   ⭐️ {}   🌟 {}   ⏳ {} min",
        summary.count,
        format_two_decimals(summary.avg_imdb_rating),
        format_two_decimals(summary.avg_user_rating),
        format_two_decimals(summary.avg_runtime)
    )
}

pub fn detail_pane(detail: &MovieDetail, watched_rating: Option<u8>) -> String {
    let rating = detail
        .imdb_rating
        .map(|r| r.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let star = if detail.is_top_rated() { "🔥" } else { "⭐️" };

    let mut lines = vec![
        format!("{}", detail.title.bold()),
        format!("{} • {}", detail.released, detail.runtime),
        detail.genre.clone(),
        format!("{} {} IMDb rating", star, rating),
        format!("Poster: {}", sanitize_poster(Some(&detail.poster)).dimmed()),
        String::new(),
        format!("{}", detail.plot.italic()),
        format!("Starring {}", detail.actors),
        format!("Directed by {}", detail.director),
    ];

    if let Some(rating) = watched_rating {
        lines.push(String::new());
        lines.push(format!("You rated this movie {} ⭐️", rating));
    }

    lines.join("\n")
}
