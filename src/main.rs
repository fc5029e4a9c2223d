use std::fmt::Display;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::debug;

use tereverde::catalog::{
    CatalogEntity, CatalogSource, CollectionView, HttpCatalogSource, MountedView,
};
use tereverde::cli::{Cli, Command, CommonArgs};
use tereverde::config::CatalogConfig;
use tereverde::directions::{self, MapQuery, PrintNavigator};
use tereverde::logging;
use tereverde::models::{Attraction, Route};
use tereverde::present::{
    self, AttractionCard, AttractionDetail, EMPTY_STATE, RouteCard, RouteDetail,
};

/// Terminal rendering of one entity kind
trait Listing: CatalogEntity + Serialize {
    fn card(&self) -> String;
    fn detail(&self) -> String;
    fn map_query(&self, region: &str) -> MapQuery;
}

impl Listing for Attraction {
    fn card(&self) -> String {
        AttractionCard(self).to_string()
    }

    fn detail(&self) -> String {
        AttractionDetail(self).to_string()
    }

    fn map_query(&self, region: &str) -> MapQuery {
        MapQuery::for_attraction(self, region)
    }
}

impl Listing for Route {
    fn card(&self) -> String {
        RouteCard(self).to_string()
    }

    fn detail(&self) -> String {
        RouteDetail(self).to_string()
    }

    fn map_query(&self, region: &str) -> MapQuery {
        MapQuery::for_route(self, region)
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn render<E>(
    view: &mut CollectionView<E>,
    args: &CommonArgs,
    config: &CatalogConfig,
    verbose: bool,
) -> Result<()>
where
    E: Listing,
    E::Facets: Display,
{
    if verbose {
        if let Some(failure) = view.load_failure() {
            eprintln!("⚠️  Load failed: {failure}");
        }
    }

    view.select_park(args.park.clone());

    if args.facets {
        print!("{}", view.facets());
        return Ok(());
    }

    if let Some(id) = args.directions {
        match view.collection().iter().find(|e| e.id() == id) {
            Some(entity) => {
                let query = entity.map_query(&config.directions.region);
                directions::navigate(&PrintNavigator, &query, &config.directions);
            }
            None => println!("{EMPTY_STATE}"),
        }
        return Ok(());
    }

    if let Some(id) = args.show {
        match view.open_detail(id) {
            Some(entity) if args.json => print_json(entity)?,
            Some(entity) => print!("{}", entity.detail()),
            None => println!("{EMPTY_STATE}"),
        }
        return Ok(());
    }

    let visible = view.visible();
    if args.json {
        return print_json(&visible);
    }
    print!("{}", present::render_list(&visible, E::card));
    Ok(())
}

async fn browse<E>(
    source: Arc<dyn CatalogSource>,
    config: &CatalogConfig,
    args: &CommonArgs,
    verbose: bool,
    select: impl FnOnce(&mut CollectionView<E>),
) -> Result<()>
where
    E: Listing,
    E::Facets: Display,
{
    let mut mounted = MountedView::<E>::mount(source, config.assets.clone());
    let state = mounted.settled().await;
    debug!(?state, "View settled");

    mounted.with(|view| {
        select(view);
        render(view, args, config, verbose)
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CatalogConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    logging::init(&config.logging, cli.verbose)?;

    let source: Arc<dyn CatalogSource> = Arc::new(HttpCatalogSource::new(&config.api)?);

    match cli.command {
        Command::Attractions { common, category } => {
            browse::<Attraction>(source, &config, &common, cli.verbose, |view| {
                view.select_category(category);
            })
            .await
        }
        Command::Routes { common, difficulty } => {
            browse::<Route>(source, &config, &common, cli.verbose, |view| {
                view.select_difficulty(difficulty);
            })
            .await
        }
    }
}
