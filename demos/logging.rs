//! Example demonstrating logging capabilities
//!
//! Run with JSON logging (production):
//! ```bash
//! cargo run --example logging --features logging-json
//! ```
//!
//! Run with pretty logging (development):
//! ```bash
//! cargo run --example logging --features logging-pretty
//! ```

use named_injector::{Injector, WeakInjector};

struct RequestContext {
    request_id: String,
}

fn main() -> named_injector::Result<()> {
    // Initialize logging - uses JSON if logging-json feature enabled,
    // pretty if logging-pretty enabled
    named_injector::logging::builder().trace().injector_only().init();

    println!("=== Named Injector Logging Demo ===\n");

    // Create root injector (logs: "Creating new root injector")
    let injector = Injector::new();

    // Map values (logs: "Creating mapping", "Configured mapping")
    injector
        .map("database_url")?
        .to_value(String::from("postgres://localhost/mydb"))?;

    // Singleton (logs: "Singleton initializing on first access" on first get)
    injector.map("context")?.to_singleton(|| RequestContext {
        request_id: "default".into(),
    })?;

    let _url = injector.get::<String>("database_url")?;
    let _ctx = injector.get::<RequestContext>("context")?;

    // Missing mapping (logs: "Mapping not found in injector or parent chain")
    assert!(injector.get_instance("missing").is_err());

    // Child injector (logs: "Creating child injector")
    let request = injector.create_child_injector();
    request.map("context")?.to_value(RequestContext {
        request_id: "req-12345".into(),
    })?;

    // Local override, then parent fallback
    let ctx = request.get::<RequestContext>("context")?;
    let _url_from_child = request.get::<String>("database_url")?;
    println!("request scope sees {}", ctx.request_id);

    // Self-registration points at the child, not the root
    let me = request.get::<WeakInjector>("injector")?;
    assert!(me.ptr_eq(&request));

    // Tear down the request scope (logs: "Tearing down injector")
    request.teardown();

    println!("\n=== Demo Complete ===");
    println!("\nTip: Use --features logging-json for production (JSON output)");
    println!("     Use --features logging-pretty for development (colorful output)");

    Ok(())
}
