//! Fail-soft media lookups for the shelf view.
//!
//! Two thin helpers over public search APIs: Bangumi subject search for
//! anime and the Steam store search for games. Every failure path, from
//! transport errors to missing fields, yields a deterministic fallback
//! record built from the keyword; no function here ever returns an error.
//!
//! Batch helpers fetch sequentially with a fixed delay between requests
//! to stay polite toward both services.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::log;

const BANGUMI_SEARCH: &str = "https://api.bgm.tv/search/subject/";
const STEAM_SEARCH: &str = "https://store.steampowered.com/api/storesearch";

/// Delay between consecutive anime lookups.
const ANIME_FETCH_DELAY: Duration = Duration::from_millis(350);
/// Delay between consecutive game lookups.
const GAME_FETCH_DELAY: Duration = Duration::from_millis(200);

/// Best-effort anime record.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimeInfo {
    pub name: String,
    pub name_cn: String,
    pub image: String,
    pub score: f64,
    pub url: String,
    /// YYYY-MM-DD or ""
    pub air_date: String,
}

impl AnimeInfo {
    /// The record returned when the service is unreachable or has no match.
    pub fn fallback(keyword: &str) -> Self {
        Self {
            name: keyword.to_string(),
            name_cn: keyword.to_string(),
            image: String::new(),
            score: 0.0,
            url: "#".to_string(),
            air_date: String::new(),
        }
    }
}

/// Best-effort game record.
#[derive(Debug, Clone, PartialEq)]
pub struct GameInfo {
    pub name: String,
    pub image: String,
    pub url: String,
    /// Always "" today: the Steam search endpoint does not return one
    pub release_date: String,
}

impl GameInfo {
    /// The record returned when the service is unreachable or has no match.
    pub fn fallback(keyword: &str) -> Self {
        Self {
            name: keyword.to_string(),
            image: String::new(),
            url: "#".to_string(),
            release_date: String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BangumiSearchResponse {
    #[serde(default)]
    list: Vec<BangumiSubject>,
}

#[derive(Debug, Deserialize)]
struct BangumiSubject {
    id: u64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    name_cn: String,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    air_date: String,
    #[serde(default)]
    images: Option<BangumiImages>,
}

#[derive(Debug, Deserialize, Default)]
struct BangumiImages {
    #[serde(default)]
    common: String,
    #[serde(default)]
    medium: String,
}

#[derive(Debug, Deserialize)]
struct SteamSearchResponse {
    #[serde(default)]
    items: Vec<SteamItem>,
}

#[derive(Debug, Deserialize)]
struct SteamItem {
    id: u64,
    #[serde(default)]
    name: String,
}

/// Shared HTTP client for media lookups.
pub fn http_client() -> Client {
    Client::builder()
        .user_agent("flick/0.1 (terminal pager)")
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_default()
}

/// Look up an anime by keyword; never fails.
pub async fn fetch_anime(client: &Client, keyword: &str) -> AnimeInfo {
    let fallback = AnimeInfo::fallback(keyword);

    let Some(url) = bangumi_search_url(keyword) else {
        return fallback;
    };
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(_) => {
            log::log_fetch("bangumi", keyword, false);
            return fallback;
        }
    };
    if !response.status().is_success() {
        log::log_fetch("bangumi", keyword, false);
        return fallback;
    }
    let data: BangumiSearchResponse = match response.json().await {
        Ok(data) => data,
        Err(_) => {
            log::log_fetch("bangumi", keyword, false);
            return fallback;
        }
    };

    match data.list.into_iter().next() {
        Some(subject) => {
            log::log_fetch("bangumi", keyword, true);
            anime_from_subject(subject, keyword)
        }
        None => {
            log::log_fetch("bangumi", keyword, false);
            fallback
        }
    }
}

/// Look up a game by keyword; never fails.
pub async fn fetch_game(client: &Client, keyword: &str) -> GameInfo {
    let fallback = GameInfo::fallback(keyword);

    let request = client
        .get(STEAM_SEARCH)
        .query(&[("term", keyword), ("l", "schinese"), ("cc", "CN")]);
    let response = match request.send().await {
        Ok(response) => response,
        Err(_) => {
            log::log_fetch("steam", keyword, false);
            return fallback;
        }
    };
    if !response.status().is_success() {
        log::log_fetch("steam", keyword, false);
        return fallback;
    }
    let data: SteamSearchResponse = match response.json().await {
        Ok(data) => data,
        Err(_) => {
            log::log_fetch("steam", keyword, false);
            return fallback;
        }
    };

    match data.items.into_iter().next() {
        Some(item) => {
            log::log_fetch("steam", keyword, true);
            game_from_item(item, keyword)
        }
        None => {
            log::log_fetch("steam", keyword, false);
            fallback
        }
    }
}

/// Fetch a list of anime sequentially, preserving input order.
pub async fn fetch_all_anime(client: &Client, keywords: &[String]) -> Vec<AnimeInfo> {
    let mut results = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        results.push(fetch_anime(client, keyword).await);
        tokio::time::sleep(ANIME_FETCH_DELAY).await;
    }
    results
}

/// Fetch a list of games sequentially, preserving input order.
pub async fn fetch_all_games(client: &Client, keywords: &[String]) -> Vec<GameInfo> {
    let mut results = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        results.push(fetch_game(client, keyword).await);
        tokio::time::sleep(GAME_FETCH_DELAY).await;
    }
    results
}

/// Render fetched records as the markdown shelf document.
pub fn shelf_markdown(anime: &[AnimeInfo], games: &[GameInfo]) -> String {
    let mut out = String::from("# Shelf\n");

    out.push_str("\n## Anime\n\n");
    if anime.is_empty() {
        out.push_str("*No anime titles configured.*\n");
    }
    for info in anime {
        let mut line = format!("- **{}**", info.name_cn);
        if info.name_cn != info.name {
            line.push_str(&format!(" ({})", info.name));
        }
        if info.score > 0.0 {
            line.push_str(&format!(" · {:.1}", info.score));
        }
        if !info.air_date.is_empty() {
            line.push_str(&format!(" · aired {}", info.air_date));
        }
        line.push('\n');
        out.push_str(&line);
        if info.url != "#" {
            out.push_str(&format!("  <{}>\n", info.url));
        }
        if !info.image.is_empty() {
            out.push_str(&format!("  cover: <{}>\n", info.image));
        }
    }

    out.push_str("\n## Games\n\n");
    if games.is_empty() {
        out.push_str("*No game titles configured.*\n");
    }
    for info in games {
        let mut line = format!("- **{}**", info.name);
        if !info.release_date.is_empty() {
            line.push_str(&format!(" · released {}", info.release_date));
        }
        line.push('\n');
        out.push_str(&line);
        if info.url != "#" {
            out.push_str(&format!("  <{}>\n", info.url));
        }
        if !info.image.is_empty() {
            out.push_str(&format!("  cover: <{}>\n", info.image));
        }
    }

    out
}

fn bangumi_search_url(keyword: &str) -> Option<Url> {
    let mut url = Url::parse(BANGUMI_SEARCH).ok()?;
    url.path_segments_mut().ok()?.pop_if_empty().push(keyword);
    url.query_pairs_mut()
        .append_pair("type", "2")
        .append_pair("responseGroup", "small");
    Some(url)
}

fn anime_from_subject(subject: BangumiSubject, keyword: &str) -> AnimeInfo {
    let name = if subject.name.is_empty() {
        keyword.to_string()
    } else {
        subject.name
    };
    let name_cn = if subject.name_cn.is_empty() {
        name.clone()
    } else {
        subject.name_cn
    };
    let images = subject.images.unwrap_or_default();
    let image = if images.common.is_empty() {
        images.medium
    } else {
        images.common
    };

    AnimeInfo {
        name,
        name_cn,
        image: upgrade_to_https(&image),
        score: subject.score,
        url: format!("https://bgm.tv/subject/{}", subject.id),
        air_date: subject.air_date,
    }
}

fn game_from_item(item: SteamItem, keyword: &str) -> GameInfo {
    let name = if item.name.is_empty() {
        keyword.to_string()
    } else {
        item.name
    };

    GameInfo {
        name,
        image: format!(
            "https://cdn.akamai.steamstatic.com/steam/apps/{}/header.jpg",
            item.id
        ),
        url: format!("https://store.steampowered.com/app/{}", item.id),
        release_date: String::new(),
    }
}

fn upgrade_to_https(url: &str) -> String {
    match url.strip_prefix("http:") {
        Some(rest) => format!("https:{}", rest),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_records() {
        let anime = AnimeInfo::fallback("Mushishi");
        assert_eq!(anime.name, "Mushishi");
        assert_eq!(anime.name_cn, "Mushishi");
        assert_eq!(anime.url, "#");
        assert_eq!(anime.score, 0.0);

        let game = GameInfo::fallback("Outer Wilds");
        assert_eq!(game.name, "Outer Wilds");
        assert_eq!(game.url, "#");
        assert!(game.release_date.is_empty());
    }

    #[test]
    fn test_anime_from_search_payload() {
        let payload = r#"{
            "list": [{
                "id": 9912,
                "name": "Mushishi",
                "name_cn": "虫师",
                "score": 8.7,
                "air_date": "2005-10-22",
                "images": { "common": "http://lain.bgm.tv/pic/cover/c/abc.jpg" }
            }]
        }"#;
        let data: BangumiSearchResponse = serde_json::from_str(payload).unwrap();
        let subject = data.list.into_iter().next().unwrap();
        let info = anime_from_subject(subject, "Mushishi");

        assert_eq!(info.name_cn, "虫师");
        assert_eq!(info.score, 8.7);
        assert_eq!(info.url, "https://bgm.tv/subject/9912");
        // Insecure image URLs are upgraded.
        assert_eq!(info.image, "https://lain.bgm.tv/pic/cover/c/abc.jpg");
    }

    #[test]
    fn test_anime_missing_fields_fall_back_to_keyword() {
        let payload = r#"{ "list": [{ "id": 1 }] }"#;
        let data: BangumiSearchResponse = serde_json::from_str(payload).unwrap();
        let info = anime_from_subject(data.list.into_iter().next().unwrap(), "Ping Pong");

        assert_eq!(info.name, "Ping Pong");
        assert_eq!(info.name_cn, "Ping Pong");
        assert!(info.image.is_empty());
        assert!(info.air_date.is_empty());
    }

    #[test]
    fn test_game_from_search_payload() {
        let payload = r#"{ "items": [{ "id": 753640, "name": "Outer Wilds" }] }"#;
        let data: SteamSearchResponse = serde_json::from_str(payload).unwrap();
        let info = game_from_item(data.items.into_iter().next().unwrap(), "Outer Wilds");

        assert_eq!(info.name, "Outer Wilds");
        assert_eq!(info.url, "https://store.steampowered.com/app/753640");
        assert_eq!(
            info.image,
            "https://cdn.akamai.steamstatic.com/steam/apps/753640/header.jpg"
        );
        assert!(info.release_date.is_empty());
    }

    #[test]
    fn test_empty_search_results_deserialize() {
        let data: BangumiSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(data.list.is_empty());

        let data: SteamSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(data.items.is_empty());
    }

    #[test]
    fn test_search_url_encodes_keyword() {
        let url = bangumi_search_url("Ping Pong the Animation").unwrap();
        assert!(url.as_str().starts_with("https://api.bgm.tv/search/subject/"));
        assert!(url.as_str().contains("Ping%20Pong%20the%20Animation"));
        assert!(url.as_str().contains("type=2"));
    }

    #[test]
    fn test_shelf_markdown_renders_records() {
        let anime = vec![AnimeInfo {
            name: "Mushishi".to_string(),
            name_cn: "虫师".to_string(),
            image: "https://lain.bgm.tv/pic/cover/c/abc.jpg".to_string(),
            score: 8.7,
            url: "https://bgm.tv/subject/9912".to_string(),
            air_date: "2005-10-22".to_string(),
        }];
        let games = vec![GameInfo::fallback("Outer Wilds")];

        let markdown = shelf_markdown(&anime, &games);
        assert!(markdown.contains("# Shelf"));
        assert!(markdown.contains("**虫师** (Mushishi) · 8.7 · aired 2005-10-22"));
        assert!(markdown.contains("<https://bgm.tv/subject/9912>"));
        assert!(markdown.contains("cover: <https://lain.bgm.tv/pic/cover/c/abc.jpg>"));
        // Fallback game renders without links or a release date.
        assert!(markdown.contains("**Outer Wilds**"));
        assert!(!markdown.contains("store.steampowered.com"));
        assert!(!markdown.contains("released"));
    }
}
