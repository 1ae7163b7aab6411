//! # Seed Data Generator
//!
//! Populates an empty database with a small catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./reelhouse.db with the default catalog
//! cargo run -p reel-db --bin seed
//!
//! # Specify database path and create an admin account
//! cargo run -p reel-db --bin seed -- --db ./data/reelhouse.db \
//!     --admin-email admin@reelhouse.local --admin-password changeme
//! ```
//!
//! ## Generated Data
//! - One genre per entry in `CATALOG`, with its movies
//! - Stock 1-5 and daily rates 2.00-4.50, derived from position
//! - A handful of customers, every third one gold
//! - Optionally, one admin user

use chrono::Utc;
use reel_core::validation::validate_registration;
use reel_core::{Customer, Genre, GenreSnapshot, Money, Movie, User};
use reel_db::repository::generate_id;
use reel_db::{hash_password, Database, DbConfig};
use std::env;

/// Genres and their movies.
const CATALOG: &[(&str, &[&str])] = &[
    (
        "Comedy",
        &[
            "Some Like It Hot",
            "The General",
            "Playtime",
            "Groundhog Day",
            "Airplane!",
        ],
    ),
    (
        "Drama",
        &[
            "Tokyo Story",
            "Bicycle Thieves",
            "The Apartment",
            "Ikiru",
        ],
    ),
    (
        "Science Fiction",
        &[
            "Metropolis",
            "Solaris",
            "Alien",
            "Gattaca",
            "Arrival",
        ],
    ),
    (
        "Thriller",
        &["Vertigo", "The Third Man", "Rear Window", "Le Samourai"],
    ),
];

const CUSTOMERS: &[(&str, &str)] = &[
    ("Ada Lovelace", "555-0100"),
    ("Grace Hopper", "555-0101"),
    ("Alan Turing", "555-0102"),
    ("Katherine Johnson", "555-0103"),
    ("Edsger Dijkstra", "555-0104"),
    ("Barbara Liskov", "555-0105"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./reelhouse.db");
    let mut admin_email: Option<String> = None;
    let mut admin_password: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--admin-email" => {
                if i + 1 < args.len() {
                    admin_email = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--admin-password" => {
                if i + 1 < args.len() {
                    admin_password = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Reelhouse Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>             Database file path (default: ./reelhouse.db)");
                println!("      --admin-email <EMAIL>   Create an admin user with this email");
                println!("      --admin-password <PW>   Password for the admin user");
                println!("  -h, --help                  Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Reelhouse Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.movies().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} movies", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        db.close().await;
        return Ok(());
    }

    let mut movies = 0;
    for (genre_idx, (genre_name, titles)) in CATALOG.iter().enumerate() {
        let genre = db
            .genres()
            .insert(&Genre {
                id: generate_id(),
                name: genre_name.to_string(),
            })
            .await?;

        for (title_idx, title) in titles.iter().enumerate() {
            let position = (genre_idx * 10 + title_idx) as i64;
            let movie = Movie {
                id: generate_id(),
                title: title.to_string(),
                genre: GenreSnapshot::from(&genre),
                number_in_stock: position % 5 + 1,
                daily_rental_rate: Money::from_cents(200 + (position % 6) * 50),
            };

            if let Err(e) = db.movies().insert(&movie).await {
                eprintln!("Failed to insert {}: {}", movie.title, e);
                continue;
            }
            movies += 1;
        }
    }
    println!("✓ Inserted {} genres, {} movies", CATALOG.len(), movies);

    for (idx, (name, phone)) in CUSTOMERS.iter().enumerate() {
        db.customers()
            .insert(&Customer {
                id: generate_id(),
                name: name.to_string(),
                phone: phone.to_string(),
                is_gold: idx % 3 == 0,
            })
            .await?;
    }
    println!("✓ Inserted {} customers", CUSTOMERS.len());

    match (admin_email, admin_password) {
        (Some(email), Some(password)) => {
            let email = email.trim().to_lowercase();
            validate_registration("Administrator", &email, &password)?;
            let admin = User {
                id: generate_id(),
                name: "Administrator".to_string(),
                email,
                password_hash: hash_password(&password)?,
                is_admin: true,
                created_at: Utc::now(),
            };
            db.users().insert(&admin).await?;
            println!("✓ Created admin user {}", admin.email);
        }
        (None, None) => {
            println!("  No admin user requested (--admin-email/--admin-password)");
        }
        _ => {
            eprintln!("⚠ Both --admin-email and --admin-password are needed; no admin created");
        }
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
