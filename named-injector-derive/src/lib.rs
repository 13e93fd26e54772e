//! Derive macro for named-injector
//!
//! `#[derive(Inject)]` implements `named_injector::Inject` for a struct with
//! named fields, so `Injector::inject_into` can wire it.
//!
//! # Example
//!
//! ```rust,ignore
//! use named_injector::{Inject, Injector};
//! use std::sync::Arc;
//!
//! struct Database {
//!     url: String,
//! }
//!
//! #[derive(Default, Inject)]
//! #[post_construct(on_ready)]
//! struct UserService {
//!     // Requests "database"
//!     #[inject]
//!     database: Option<Arc<Database>>,
//!     // Requests "greeting" by name "en"
//!     #[inject(name = "en", ty = "greeting")]
//!     welcome: Option<Arc<String>>,
//!     // Not injected
//!     ready: bool,
//! }
//!
//! impl UserService {
//!     fn on_ready(&mut self) {
//!         self.ready = true;
//!     }
//! }
//!
//! let injector = Injector::new();
//! injector.map("database")?.to_value(Database { url: "postgres://localhost".into() })?;
//! injector.map(("greeting", "en"))?.to_value(String::from("Hello"))?;
//!
//! let service = injector.create_instance::<UserService>()?;
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use std::collections::HashSet;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, LitStr, Token, Type, parse_macro_input};

/// Derive macro for member injection.
///
/// # Attributes
///
/// - `#[inject]` - Wire this field with the binding named after the field.
/// - `#[inject(ty = "T")]` - Request type `T` instead of the field name.
/// - `#[inject(name = "X")]` - Request the binding qualified by `X`.
/// - `#[post_construct(a, b)]` (on the struct) - Methods `fn(&mut self)` to
///   run, in order, once all fields are wired. Every listed name must be such
///   a method: a field or a method with another signature fails to compile
///   instead of being skipped at runtime. Repeated names run once per listing.
///
/// Injected fields must have type `Option<Arc<T>>`; they are `None` until
/// wired. Other fields are left alone.
#[proc_macro_derive(Inject, attributes(inject, post_construct))]
pub fn derive_inject(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand_inject(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_inject(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Only support structs with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Inject can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Inject can only be derived for structs",
            ));
        }
    };

    let mut points = Vec::new();
    let mut assignments = Vec::new();

    for field in fields.iter() {
        let Some(request) = find_inject_attr(&field.attrs)? else {
            continue;
        };

        let field_name = field.ident.as_ref().unwrap();
        let member = field_name.unraw().to_string();

        let Some(inner_type) = extract_option_arc_inner_type(&field.ty) else {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "Fields marked with #[inject] must have type Option<Arc<T>>",
            ));
        };

        let type_name = request
            .ty
            .map(|lit| lit.value())
            .unwrap_or_else(|| member.clone());

        let identifier = match request.name {
            Some(qualifier) => quote! {
                ::named_injector::Identifier::named(#type_name, #qualifier)
            },
            None => quote! {
                ::named_injector::Identifier::new(#type_name)
            },
        };

        points.push(quote! {
            ::named_injector::InjectionPoint::new(#member, #identifier)
        });
        assignments.push(quote! {
            #member => {
                self.#field_name = ::std::option::Option::Some(
                    ::named_injector::downcast::<#inner_type>(instance, point.identifier())?
                );
                ::std::result::Result::Ok(())
            }
        });
    }

    let hooks = find_post_constructs(&input.attrs)?;
    let hook_names: Vec<String> = hooks.iter().map(|hook| hook.unraw().to_string()).collect();

    // One match arm per distinct hook
    let mut seen = HashSet::new();
    let (arm_names, arm_hooks): (Vec<&String>, Vec<&Ident>) = hook_names
        .iter()
        .zip(&hooks)
        .filter(|(name, _)| seen.insert(name.as_str()))
        .unzip();

    Ok(quote! {
        impl #impl_generics ::named_injector::Inject for #name #ty_generics #where_clause {
            fn injection_points() -> ::std::vec::Vec<::named_injector::InjectionPoint> {
                ::std::vec![#(#points),*]
            }

            #[allow(unused_variables)]
            fn assign(
                &mut self,
                point: &::named_injector::InjectionPoint,
                instance: ::named_injector::Instance,
            ) -> ::named_injector::Result<()> {
                match point.member() {
                    #(#assignments)*
                    other => ::std::result::Result::Err(
                        ::named_injector::DiError::unknown_member::<Self>(other)
                    ),
                }
            }

            fn post_constructs() -> &'static [&'static str] {
                &[#(#hook_names),*]
            }

            fn hook(name: &str) -> ::std::option::Option<fn(&mut Self)> {
                match name {
                    #(#arm_names => ::std::option::Option::Some(Self::#arm_hooks),)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    })
}

/// Parsed `#[inject(...)]` arguments
#[derive(Default)]
struct InjectAttr {
    name: Option<LitStr>,
    ty: Option<LitStr>,
}

/// Find and parse the #[inject] attribute
fn find_inject_attr(attrs: &[Attribute]) -> syn::Result<Option<InjectAttr>> {
    let Some(attr) = attrs.iter().find(|attr| attr.path().is_ident("inject")) else {
        return Ok(None);
    };

    let mut parsed = InjectAttr::default();

    // Bare #[inject]
    if attr.meta.require_path_only().is_ok() {
        return Ok(Some(parsed));
    }

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            parsed.name = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("ty") {
            parsed.ty = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("expected `name = \"...\"` or `ty = \"...\"`"))
        }
    })?;

    if let Some(name) = &parsed.name {
        if name.value().is_empty() {
            return Err(syn::Error::new_spanned(name, "injection name must not be empty"));
        }
    }
    if let Some(ty) = &parsed.ty {
        if ty.value().is_empty() {
            return Err(syn::Error::new_spanned(ty, "injection type must not be empty"));
        }
    }

    Ok(Some(parsed))
}

/// Collect hook names from every #[post_construct(...)], in order
fn find_post_constructs(attrs: &[Attribute]) -> syn::Result<Vec<Ident>> {
    let mut hooks = Vec::new();
    for attr in attrs {
        if attr.path().is_ident("post_construct") {
            let names =
                attr.parse_args_with(Punctuated::<Ident, Token![,]>::parse_terminated)?;
            hooks.extend(names);
        }
    }
    Ok(hooks)
}

/// Extract T from Arc<T>
fn extract_arc_inner_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        let segment = type_path.path.segments.last()?;
        if segment.ident == "Arc" {
            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                    return Some(inner);
                }
            }
        }
    }
    None
}

/// Extract T from Option<Arc<T>>
fn extract_option_arc_inner_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        let segment = type_path.path.segments.last()?;
        if segment.ident == "Option" {
            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                    return extract_arc_inner_type(inner);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand(input: DeriveInput) -> syn::Result<String> {
        expand_inject(&input).map(|tokens| tokens.to_string())
    }

    #[test]
    fn test_rejects_empty_type() {
        let err = expand(parse_quote! {
            struct Service {
                #[inject(ty = "")]
                database: Option<Arc<Database>>,
            }
        })
        .unwrap_err();

        assert_eq!(err.to_string(), "injection type must not be empty");
    }

    #[test]
    fn test_rejects_empty_name() {
        let err = expand(parse_quote! {
            struct Service {
                #[inject(name = "")]
                database: Option<Arc<Database>>,
            }
        })
        .unwrap_err();

        assert_eq!(err.to_string(), "injection name must not be empty");
    }

    #[test]
    fn test_repeated_hook_gets_one_arm() {
        let expanded = expand(parse_quote! {
            #[post_construct(warm_up, connect, warm_up)]
            struct Service {
                ready: bool,
            }
        })
        .unwrap();

        assert_eq!(expanded.matches("\"warm_up\" =>").count(), 1);
        assert_eq!(expanded.matches("\"connect\" =>").count(), 1);
        // Both listings survive in post_constructs()
        assert_eq!(expanded.matches("\"warm_up\"").count(), 3);
    }

    #[test]
    fn test_rejects_non_option_arc_field() {
        let err = expand(parse_quote! {
            struct Service {
                #[inject]
                database: Arc<Database>,
            }
        })
        .unwrap_err();

        assert!(err.to_string().contains("Option<Arc<T>>"));
    }
}
