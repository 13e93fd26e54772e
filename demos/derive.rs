//! Example demonstrating the #[derive(Inject)] macro
//!
//! Run with:
//!   cargo run --example derive --features derive

use named_injector::{Inject, Injector};
use std::sync::Arc;

// Dependencies
struct Database {
    url: String,
}

struct Cache {
    size: usize,
}

// Service with injected dependencies
#[derive(Default, Inject)]
#[post_construct(on_ready)]
struct UserService {
    #[inject]
    database: Option<Arc<Database>>,
    #[inject(name = "users", ty = "cache")]
    cache: Option<Arc<Cache>>,
    // Non-injected field keeps its default
    ready: bool,
}

impl UserService {
    fn on_ready(&mut self) {
        self.ready = true;
    }

    fn describe(&self) -> String {
        match (&self.database, &self.cache) {
            (Some(db), Some(cache)) => format!(
                "UserService connected to {} with cache size {} (ready: {})",
                db.url, cache.size, self.ready
            ),
            _ => "UserService is not wired".to_string(),
        }
    }
}

fn main() -> named_injector::Result<()> {
    let injector = Injector::new();

    injector.map("database")?.to_value(Database {
        url: "postgres://localhost/app".into(),
    })?;
    injector
        .map(("cache", "users"))?
        .to_singleton(|| Cache { size: 1024 })?;

    let service = injector.create_instance::<UserService>()?;
    println!("{}", service.describe());

    // A child injector can swap the database for its own scope
    let tests = injector.create_child_injector();
    tests.map("database")?.to_value(Database {
        url: "sqlite::memory:".into(),
    })?;

    let mut scoped = UserService::default();
    tests.inject_into(&mut scoped)?;
    println!("{}", scoped.describe());

    Ok(())
}
