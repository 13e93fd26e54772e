//! Example wiring a hand-written `Inject` impl from string directives
//!
//! Run with:
//!   cargo run --example directives

use named_injector::{
    DiError, Inject, InjectionPoint, Injector, Instance, Result, annotation, downcast,
};
use std::sync::Arc;

/// Member name and directive, as a configuration file might list them
const MEMBERS: &[(&str, &str)] = &[
    ("greeting", "inject"),
    ("farewell", r#"inject(name="formal"):greeting"#),
    ("motto", "carpe diem"),
];

#[derive(Default)]
struct Page {
    greeting: Option<Arc<String>>,
    farewell: Option<Arc<String>>,
    rendered: Option<String>,
}

impl Page {
    fn render(&mut self) {
        let part = |value: &Option<Arc<String>>| {
            value.as_deref().cloned().unwrap_or_default()
        };
        self.rendered = Some(format!("{} ... {}", part(&self.greeting), part(&self.farewell)));
    }
}

impl Inject for Page {
    fn injection_points() -> Vec<InjectionPoint> {
        MEMBERS
            .iter()
            .filter_map(|(member, directive)| InjectionPoint::parse(member, directive))
            .collect()
    }

    fn assign(&mut self, point: &InjectionPoint, instance: Instance) -> Result<()> {
        let value = downcast::<String>(instance, point.identifier())?;
        match point.member() {
            "greeting" => self.greeting = Some(value),
            "farewell" => self.farewell = Some(value),
            other => return Err(DiError::unknown_member::<Self>(other)),
        }
        Ok(())
    }

    fn post_constructs() -> &'static [&'static str] {
        &["render"]
    }

    fn hook(name: &str) -> Option<fn(&mut Self)> {
        match name {
            "render" => Some(Self::render),
            _ => None,
        }
    }
}

fn main() -> Result<()> {
    for (member, directive) in MEMBERS {
        match annotation::parse(member, directive) {
            Some(request) => println!("{member}: {request:?}"),
            None => println!("{member}: not a directive"),
        }
    }

    let injector = Injector::new();
    injector.map("greeting")?.to_value(String::from("Hello"))?;
    injector
        .map(("greeting", "formal"))?
        .to_value(String::from("Kind regards"))?;

    let page = injector.create_instance::<Page>()?;
    println!("{}", page.rendered.unwrap_or_default());

    Ok(())
}
