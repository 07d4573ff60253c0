use anyhow::{Context, Result};
use ourguide::models::SearchResult;
use ourguide::pagination::PageLabel;
use ourguide::search::SEARCH_PATH;
use ourguide::{
    AppConfig, CriteriaKey, HttpSpaceApi, Paginator, QueryParams, SearchSession, SpaceApi,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ourguide=info".parse()?))
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    match args[1].as_str() {
        "help" | "--help" | "-h" => print_help(),
        "window" => {
            if args.len() < 4 {
                eprintln!("Usage: ourguide window <query> <total-count> [go-to-page]");
                return Ok(());
            }
            let total: u64 = args[3]
                .parse()
                .with_context(|| format!("Invalid total count: {}", args[3]))?;
            show_window(&args[2], total, args.get(4).map(String::as_str))?;
        }
        "search" => {
            if args.len() < 3 {
                eprintln!("Usage: ourguide search <query>");
                return Ok(());
            }
            search(&args[2]).await?;
        }
        "space" => {
            if args.len() < 3 {
                eprintln!("Usage: ourguide space <id>");
                return Ok(());
            }
            show_space(&args[2]).await?;
        }
        "suggest" => {
            if args.len() < 3 {
                eprintln!("Usage: ourguide suggest <name>");
                return Ok(());
            }
            suggest(&args[2]).await?;
        }
        command => {
            eprintln!("Unknown command: {}", command);
            print_help();
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"OurGuide - find and review welcoming spaces

USAGE:
    ourguide <COMMAND> [ARGS]

COMMANDS:
    help        Show this help message
    window      Print the pagination window for a query and result count
    search      Search spaces matching a query
    space       Show a single space
    suggest     Suggest space names for autocomplete

ENVIRONMENT:
    OURGUIDE_API_HOST               Backend base URL (default http://localhost:3000)
    OURGUIDE_REQUEST_TIMEOUT_SECS   Request timeout (default 30)
    OURGUIDE_PAGE_SIZE              Results per page when the query has none (default 20)

EXAMPLES:
    ourguide window "searchTerm=coffee&page=2&perPage=20" 95
    ourguide window "searchTerm=coffee" 950 12
    ourguide search "searchTerm=coffee&indicators=3"
    ourguide space 42
    ourguide suggest "Busboys"
"#
    );
}

fn client() -> Result<(AppConfig, HttpSpaceApi)> {
    let config = AppConfig::from_env();
    let api = HttpSpaceApi::new(&config)
        .with_context(|| format!("Failed to create client for {}", config.api_host))?;
    Ok((config, api))
}

/// Apply the configured page size when the query does not choose one.
fn with_page_size(query: &str, config: &AppConfig) -> String {
    let mut params = QueryParams::parse(query);
    let per_page = CriteriaKey::PerPage.param();
    if !params.contains(per_page) {
        params.set(per_page, config.page_size.to_string());
    }
    params.to_string()
}

fn show_window(query: &str, total: u64, go_to: Option<&str>) -> Result<()> {
    let config = AppConfig::from_env();
    let session = SearchSession::new(&with_page_size(query, &config));
    let window = session.page_window(total);

    match session.range_label(total) {
        Some(label) => println!("{}", label),
        None => println!("No results"),
    }

    if !window.has_navigation() {
        return Ok(());
    }

    println!("<  {}", window.back.as_deref().unwrap_or("(disabled)"));
    for entry in &window.entries {
        match &entry.label {
            PageLabel::Page(n) if entry.is_current => println!("[{}] {}", n, link(entry.link.as_deref())),
            PageLabel::Page(n) => println!(" {}  {}", n, link(entry.link.as_deref())),
            PageLabel::Ellipsis(label) => println!(" {}  go to page 1-{}", label, window.total_pages),
        }
    }
    println!(">  {}", window.next.as_deref().unwrap_or("(disabled)"));

    if let Some(input) = go_to {
        let paginator = Paginator::new(SEARCH_PATH, session.store().params());
        match paginator.go_to(&window, input) {
            Some(link) => println!("Go to page {}: {}", input, link),
            None => println!("Not a page number: {:?}", input),
        }
    }

    println!();
    println!("{}", serde_json::to_string_pretty(&window)?);
    Ok(())
}

fn link(link: Option<&str>) -> &str {
    link.unwrap_or("")
}

async fn search(query: &str) -> Result<()> {
    let (config, api) = client()?;
    let mut session = SearchSession::new(&with_page_size(query, &config));

    info!("Searching {} for {:?}", config.api_host, session.criteria().search_term);
    let results = session.refresh(&api).await;

    if results.is_empty() {
        println!("No spaces found");
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        print_result(i + 1, result);
    }
    Ok(())
}

fn print_result(position: usize, result: &SearchResult) {
    println!("{}. {} ({})", position, result.name, result.category);
    println!("   {}", result.address.trim());
    if let Some(rating) = result.average_rating {
        println!("   Rating: {}", rating);
    }
    if let Some(phone) = result.formatted_phone() {
        println!("   Phone: {}", phone);
    }
    if !result.filters.is_empty() {
        let names: Vec<&str> = result.filters.iter().map(|f| f.name.as_str()).collect();
        println!("   Indicators: {}", names.join(", "));
    }
    println!("   Directions: {}", result.maps_link());
    if let Some(url) = &result.url {
        println!("   URL: {}", url);
    }
    println!("   Details: {}", result.details_path());
    println!();
}

async fn show_space(id: &str) -> Result<()> {
    let (_, api) = client()?;
    let space = api
        .get_space(id)
        .await
        .with_context(|| format!("Failed to load space {}", id))?;

    print_result(1, &SearchResult::from_raw(&space));
    if let Some(updated_at) = space.updated_at {
        println!("   Last updated: {}", updated_at.format("%Y-%m-%d"));
    }
    Ok(())
}

async fn suggest(name: &str) -> Result<()> {
    let (_, api) = client()?;
    let options = api.spaces_by_name(name).await;
    if options.is_empty() {
        println!("No suggestions for {:?}", name);
    }
    for option in options {
        println!("{}\t{}", option.value, option.name);
    }
    Ok(())
}
