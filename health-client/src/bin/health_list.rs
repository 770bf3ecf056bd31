//! Print one page of a resource list as JSON.
//!
//! ```text
//! health-list <users|staff|parents|medication|events> [search] [page]
//! ```

use anyhow::{Context, bail};
use health_client::api::{
    HEALTH_EVENTS_PATH, MEDICATION_REQUESTS_PATH, PARENTS_PATH, STAFF_PATH, USERS_PATH,
};
use health_client::list::{FetchOutcome, ListController};
use health_client::{ClientConfig, SchoolHealthApi, logger};
use shared::ListQuery;

fn resource_path(name: &str) -> anyhow::Result<&'static str> {
    Ok(match name {
        "users" => USERS_PATH,
        "staff" => STAFF_PATH,
        "parents" => PARENTS_PATH,
        "medication" => MEDICATION_REQUESTS_PATH,
        "events" => HEALTH_EVENTS_PATH,
        other => bail!("unknown resource '{}'", other),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_logger();

    let mut args = std::env::args().skip(1);
    let resource = args
        .next()
        .context("usage: health-list <users|staff|parents|medication|events> [search] [page]")?;
    let search = args.next().unwrap_or_default();
    let page: u32 = match args.next() {
        Some(page) => page.parse().context("page must be a positive number")?,
        None => 1,
    };

    let config = ClientConfig::from_env();
    tracing::info!(url = %config.base_url, resource = %resource, "Fetching list");

    let api = SchoolHealthApi::new(config.build_http_client()?);
    let endpoint = api.endpoint(resource_path(&resource)?);
    let mut list: ListController<serde_json::Value, _> =
        ListController::new(endpoint, ListQuery::new(config.page_size), config.search_debounce());

    list.set_search_term(search);
    list.submit_search();
    list.set_page(page);

    match list.fetch().await {
        FetchOutcome::Loaded => {
            let out = serde_json::json!({
                "pageIndex": list.page_index(),
                "totalCount": list.total_count(),
                "totalPages": list.total_pages(),
                "items": list.items(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(())
        }
        FetchOutcome::Failed(message) => {
            bail!(message.unwrap_or_else(|| "request cancelled".to_string()))
        }
        FetchOutcome::Discarded => bail!("response superseded"),
    }
}
