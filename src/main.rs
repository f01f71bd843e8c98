use clap::Parser;
use parceltrack::auth::{Role, TokenStore};
use parceltrack::registry::{Parcel, ParcelRegistry};
use parceltrack::route::{GeoTables, RouteResolver};
use parceltrack::server::{self, AppState};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Parceltrack — parcel tracking with geodesic route lookup.
///
/// Resolves a tracking id to its origin/destination pincodes and the
/// great-circle distance between them, or runs the full HTTP service.
///
/// Examples:
///   parceltrack PKG1001
///   parceltrack PKG1001 --tables ./geotables.json
///   parceltrack --serve --port 8000 --demo
#[derive(Parser)]
#[command(name = "parceltrack", version, about, long_about = None)]
struct Cli {
    /// Tracking id to resolve (one-shot mode). Example: parceltrack PKG1001
    #[arg(index = 1)]
    tracking: Option<String>,

    /// Run the HTTP service instead of a one-shot lookup.
    #[arg(long)]
    serve: bool,

    /// Bind host for --serve.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Bind port for --serve.
    #[arg(long, short = 'p', default_value_t = 8000)]
    port: u16,

    /// Geo tables JSON file. Defaults to ~/.parceltrack/geotables.json
    /// if present, else the built-in dataset.
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Seed the registry with demo parcels matching the built-in routes.
    #[arg(long)]
    demo: bool,
}

fn main() {
    let cli = Cli::parse();

    let tables = load_tables(&cli);

    if cli.serve {
        serve(&cli, tables);
        return;
    }

    // ── One-shot route lookup ───────────────────────────────────

    let Some(ref tracking) = cli.tracking else {
        eprintln!("Error: No tracking id specified.");
        eprintln!();
        eprintln!("Usage:");
        eprintln!("  parceltrack PKG1001");
        eprintln!("  parceltrack PKG1001 --tables ./geotables.json");
        eprintln!("  parceltrack --serve --port 8000 --demo");
        std::process::exit(1);
    };

    let resolver = RouteResolver::new(tables);
    let result = resolver.resolve(tracking).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    eprintln!("  \u{1F4E6} {} : {} \u{2192} {}", result.tracking_id, result.from, result.to);

    // JSON to stdout
    println!("{}", serde_json::to_string_pretty(&result).unwrap());
}

fn load_tables(cli: &Cli) -> GeoTables {
    if let Some(ref path) = cli.tables {
        return GeoTables::load_from(path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
    }

    let default = GeoTables::default_path();
    if default.exists() {
        match GeoTables::load_from(&default) {
            Ok(t) => return t,
            Err(e) => eprintln!("Warning: {} — using built-in dataset", e),
        }
    }
    GeoTables::builtin()
}

fn serve(cli: &Cli, tables: GeoTables) {
    let mut registry = ParcelRegistry::new();
    if cli.demo {
        seed_demo(&mut registry);
    }

    let mut tokens = TokenStore::new();
    eprintln!("  Tokens (one per role):");
    for role in [Role::Viewer, Role::Staff, Role::Admin] {
        let token = tokens.issue(role);
        eprintln!("    {:<6} {}", role.to_string(), token);
    }

    let state = Arc::new(AppState {
        registry: Mutex::new(registry),
        resolver: RouteResolver::new(tables),
        tokens,
    });

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Error: Cannot start runtime: {}", e);
        std::process::exit(1);
    });
    runtime.block_on(server::start(&cli.host, cli.port, state));
}

fn seed_demo(registry: &mut ParcelRegistry) {
    let demo = [
        ("Asha Patel", "12 Marine Drive, Mumbai", "+91-9800000001", "small", "1.2kg", "PKG1001"),
        ("Ravi Kumar", "4 MG Road, Bengaluru", "+91-9800000002", "medium", "2.5kg", "PKG1002"),
        ("Meera Nair", "9 Park Street, Kolkata", "+91-9800000003", "large", "7.0kg", "PKG1003"),
        ("Vikram Singh", "31 Banjara Hills, Hyderabad", "+91-9800000004", "small", "0.8kg", "PKG1004"),
    ];
    for (customer, address, contact, size, weight, tracking) in demo {
        let parcel = Parcel {
            customer_name: customer.into(),
            delivery_address: address.into(),
            contact_number: contact.into(),
            parcel_size: size.into(),
            parcel_weight: weight.into(),
            tracking_number: tracking.into(),
        };
        // Demo data is static and duplicate-free.
        registry.create(parcel).unwrap();
    }
    eprintln!("  Seeded {} demo parcels.", registry.len());
}
