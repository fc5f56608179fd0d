//! # Seed Data Generator
//!
//! Populates the catalog with a small sample dataset for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./catalog.db (or CATALOG_DB_PATH)
//! cargo run -p catalog-service --bin seed
//!
//! # Use a config file
//! cargo run -p catalog-service --bin seed -- --config ./catalog.toml
//!
//! # Specify database path
//! cargo run -p catalog-service --bin seed -- --db ./data/catalog.db
//! ```
//!
//! ## Generated Data
//! Three pokemon, each with one owner, one category and a handful of
//! reviews, all created through the services so every check runs.

use chrono::NaiveDate;
use std::env;
use std::path::PathBuf;

use catalog_core::{Category, Country, Owner, Pokemon, Review, Reviewer};
use catalog_service::logging::init_tracing;
use catalog_service::{Catalog, CatalogConfig};

struct SeedPokemon {
    name: &'static str,
    born: (i32, u32, u32),
    category: &'static str,
    owner: (&'static str, &'static str, &'static str),
    reviews: &'static [(&'static str, &'static str, i32, (&'static str, &'static str))],
}

const POKEMON: &[SeedPokemon] = &[
    SeedPokemon {
        name: "Pikachu",
        born: (1903, 1, 1),
        category: "Electric",
        owner: ("Jack", "London", "Kanto"),
        reviews: &[
            ("Pikachu", "Pickahu is the best pokemon, because it is electric", 5, ("Teddy", "Smith")),
            ("Pikachu", "Pickachu is the best a killing rocks", 5, ("Taylor", "Jones")),
            ("Pikachu", "Pickchu, pickachu, pikachu", 1, ("Jessica", "McGregor")),
        ],
    },
    SeedPokemon {
        name: "Squirtle",
        born: (1903, 1, 1),
        category: "Water",
        owner: ("Harry", "Potter", "Saffron City"),
        reviews: &[
            ("Squirtle", "squirtle is the best pokemon, because it is electric", 5, ("Teddy", "Smith")),
            ("Squirtle", "Squirtle is the best a killing rocks", 5, ("Taylor", "Jones")),
            ("Squirtle", "squirtle, squirtle, squirtle", 1, ("Jessica", "McGregor")),
        ],
    },
    SeedPokemon {
        name: "Venasuar",
        born: (1903, 1, 1),
        category: "Leaf",
        owner: ("Ash", "Ketchum", "Millet Town"),
        reviews: &[
            ("Veasaur", "Venasuar is the best pokemon, because it is electric", 5, ("Teddy", "Smith")),
            ("Veasaur", "Venasuar is the best a killing rocks", 5, ("Taylor", "Jones")),
            ("Veasaur", "Venasuar, Venasuar, Venasuar", 1, ("Jessica", "McGregor")),
        ],
    },
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut db_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Review Catalog Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  TOML config file");
                println!("  -d, --db <PATH>      Database file path (overrides config)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let mut config = CatalogConfig::load(config_path.as_deref())?;
    if let Some(path) = db_path {
        config.database.path = path;
    }
    init_tracing(&config.logging.level);

    println!("🌱 Review Catalog Seed Data Generator");
    println!("=====================================");
    println!("Database: {}", config.database.path.display());
    println!();

    let catalog = Catalog::open(&config).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = catalog.pokemon().list().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} pokemon", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut reviews = 0;

    for seed in POKEMON {
        let (owner_first, owner_last, country_name) = seed.owner;

        let country = catalog.countries().create(Country::new(country_name)).await?;
        let owner = catalog
            .owners()
            .create(country.id, Owner::new(owner_first, owner_last, country.id))
            .await?;
        let category = catalog.categories().create(Category::new(seed.category)).await?;

        let (y, m, d) = seed.born;
        let born = NaiveDate::from_ymd_opt(y, m, d).ok_or("invalid seed birth date")?;
        let pokemon = catalog
            .pokemon()
            .create(owner.id, category.id, Pokemon::new(seed.name, born))
            .await?;

        for (n, (title, text, rating, (first, last))) in seed.reviews.iter().enumerate() {
            let reviewer = find_or_create_reviewer(&catalog, first, last).await?;
            // Titles repeat per pokemon in the sample data; suffix keeps them unique.
            let title = format!("{} #{}", title, n + 1);
            catalog
                .reviews()
                .create(
                    reviewer.id,
                    pokemon.id,
                    Review::new(title, *text, *rating, pokemon.id, reviewer.id),
                )
                .await?;
            reviews += 1;
        }

        let rating = catalog.pokemon().rating(pokemon.id).await?;
        println!("  {} ({}) rated {}", pokemon.name, category.name, rating);
    }

    println!();
    println!(
        "✓ Seeded {} pokemon and {} reviews in {:?}",
        POKEMON.len(),
        reviews,
        start.elapsed()
    );

    catalog.database().close().await;
    Ok(())
}

async fn find_or_create_reviewer(
    catalog: &Catalog,
    first: &str,
    last: &str,
) -> Result<Reviewer, Box<dyn std::error::Error>> {
    let existing = catalog
        .reviewers()
        .list()
        .await?
        .into_iter()
        .find(|r| r.last_name == last);

    match existing {
        Some(reviewer) => Ok(reviewer),
        None => Ok(catalog.reviewers().create(Reviewer::new(first, last)).await?),
    }
}
