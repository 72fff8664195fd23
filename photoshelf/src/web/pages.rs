//! HTML folder views.

use axum::http::StatusCode;
use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::listing::{is_image_name, ListingItem};

use super::urls;

const STYLES: &str = r#"
* { box-sizing: border-box; }
body {
    margin: 0;
    font-family: system-ui, sans-serif;
    background: #111;
    color: #ddd;
}
header { padding: 12px 16px; border-bottom: 1px solid #333; }
header h1 { margin: 0; font-size: 1.1rem; }
header .path { margin: 4px 0 0; color: #888; word-break: break-all; }
header .up { color: #8cf; text-decoration: none; }
.grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(210px, 1fr));
    gap: 10px;
    padding: 12px;
}
.card {
    display: block;
    background: #1c1c1c;
    border: 1px solid #333;
    border-radius: 6px;
    overflow: hidden;
    text-decoration: none;
    color: inherit;
}
.card img { display: block; width: 100%; height: 160px; object-fit: cover; }
.card .placeholder {
    display: flex;
    align-items: center;
    justify-content: center;
    height: 160px;
    font-size: 2.5rem;
    background: #222;
}
.card .meta { padding: 6px 8px; font-size: 0.85rem; }
.card .name { display: block; word-break: break-all; }
.card .count { color: #888; font-size: 0.75rem; }
.empty { padding: 24px 16px; color: #888; }
.error { padding: 48px 16px; text-align: center; }
.error a { color: #8cf; }
"#;

/// Render the folder view for `current`.
pub(super) fn gallery(
    current: &str,
    parent: Option<&str>,
    items: &[ListingItem],
    buster: &str,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title {
                    @if current.is_empty() { "photoshelf" } @else { (current) " | photoshelf" }
                }
                style { (PreEscaped(STYLES)) }
            }
            body {
                header {
                    h1 { "photoshelf" }
                    p class="path" { "/" (current) }
                    @if let Some(parent) = parent {
                        a class="up" href=(urls::page_url(parent)) { "\u{2b06} up" }
                    }
                }
                @if items.is_empty() {
                    p class="empty" { "Nothing here." }
                } @else {
                    div class="grid" {
                        @for item in items {
                            @if item.is_directory {
                                (directory_card(item, buster))
                            } @else if is_image_name(&item.file_name) {
                                (image_card(item, buster))
                            } @else {
                                (file_card(item, buster))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn directory_card(item: &ListingItem, buster: &str) -> Markup {
    html! {
        a class="card" href=(urls::page_url(&item.sub_path)) {
            @if let Some(preview) = &item.representative_image {
                img src=(urls::thumbnail_url(preview, buster)) alt=(item.file_name) loading="lazy";
            } @else {
                div class="placeholder" { "\u{1f4c1}" }
            }
            div class="meta" {
                span class="name" { (item.file_name) }
                @if item.subdirectory_count == 1 {
                    span class="count" { "1 folder" }
                } @else if item.subdirectory_count > 1 {
                    span class="count" { (item.subdirectory_count) " folders" }
                }
            }
        }
    }
}

fn image_card(item: &ListingItem, buster: &str) -> Markup {
    html! {
        a class="card" href=(urls::file_url(&item.sub_path, buster)) {
            img src=(urls::thumbnail_url(&item.sub_path, buster))
                alt=(item.file_name)
                loading="lazy";
            div class="meta" {
                span class="name" { (item.file_name) }
            }
        }
    }
}

fn file_card(item: &ListingItem, buster: &str) -> Markup {
    html! {
        a class="card" href=(urls::file_url(&item.sub_path, buster)) {
            div class="placeholder" { "\u{1f4c4}" }
            div class="meta" {
                span class="name" { (item.file_name) }
            }
        }
    }
}

/// Minimal error page shared by every failure response.
pub(super) fn error(status: StatusCode, message: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { (status.as_u16()) " | photoshelf" }
                style { (PreEscaped(STYLES)) }
            }
            body {
                div class="error" {
                    h1 { (status.as_u16()) }
                    p { (message) }
                    a href="/fs" { "back to the gallery" }
                }
            }
        }
    }
}
