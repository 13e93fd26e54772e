#![no_main]

//! Fuzz target for mapping, lookup and scoping operations
//!
//! Mirrors every operation against a simple model and checks the injector
//! agrees with it.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use named_injector::{Identifier, Injector, WeakInjector};
use std::collections::HashMap;

#[derive(Debug, Arbitrary)]
struct Key {
    type_index: u8,
    name: Option<u8>,
}

impl Key {
    fn identifier(&self) -> Identifier {
        let type_name = format!("t{}", self.type_index % 4);
        match self.name {
            Some(name) => Identifier::named(type_name, format!("n{}", name % 3)),
            None => Identifier::new(type_name),
        }
    }
}

#[derive(Debug, Arbitrary)]
enum Op {
    MapValue { scope: bool, key: Key, value: u32 },
    Unmap { scope: bool, key: Key },
    Get { scope: bool, key: Key },
    Teardown { scope: bool },
}

fuzz_target!(|ops: Vec<Op>| {
    let root = Injector::new();
    let child = root.create_child_injector();

    // One model registry per scope
    let mut models: [HashMap<Identifier, u32>; 2] = [HashMap::new(), HashMap::new()];

    for op in ops {
        match op {
            Op::MapValue { scope, key, value } => {
                let injector = if scope { &child } else { &root };
                let id = key.identifier();
                let binding = injector.map(&id).unwrap();
                if binding.to_value(value).is_ok() {
                    models[scope as usize].insert(id, value);
                }
            }
            Op::Unmap { scope, key } => {
                let injector = if scope { &child } else { &root };
                let id = key.identifier();
                let expected = models[scope as usize].remove(&id).is_some();
                assert_eq!(injector.unmap(&id).is_ok(), expected);
            }
            Op::Get { scope, key } => {
                let id = key.identifier();
                let expected = if scope {
                    models[1].get(&id).or_else(|| models[0].get(&id))
                } else {
                    models[0].get(&id)
                };
                let injector = if scope { &child } else { &root };
                match expected {
                    Some(value) => assert_eq!(*injector.get::<u32>(&id).unwrap(), *value),
                    None => assert!(injector.get_instance(&id).is_err()),
                }
            }
            Op::Teardown { scope } => {
                let injector = if scope { &child } else { &root };
                injector.teardown();
                models[scope as usize].clear();
                let me = injector.get::<WeakInjector>("injector").unwrap();
                assert!(me.ptr_eq(injector));
            }
        }
    }
});
