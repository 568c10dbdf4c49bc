//! Procedural macros for compose-dispatch

use darling::{FromDeriveInput, FromField, FromVariant};
use proc_macro::TokenStream;
use proc_macro2::{Ident, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use std::collections::BTreeMap;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Enable automatic category inference from variant name prefixes
    #[darling(default)]
    infer_categories: bool,
}

/// Variant-level attributes
#[derive(FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<VariantField>,

    /// Explicit category override
    #[darling(default)]
    category: Option<String>,

    /// Exclude from category inference
    #[darling(default)]
    skip_category: bool,

    /// The single field is itself an action family
    #[darling(default)]
    nested: bool,
}

#[derive(FromField)]
struct VariantField {
    ty: syn::Type,
}

// Verbs that END an action name. Everything before the verb is the category
// prefix: "FavoritePrimesDelete" -> "favorite_primes".
const ACTION_VERBS: &[&str] = &[
    "Start", "End", "Open", "Close", "Submit", "Confirm", "Cancel", "Dismiss", "Next", "Prev",
    "Add", "Remove", "Clear", "Update", "Set", "Get", "Load", "Fetch", "Save", "Delete", "Create",
    "Increment", "Decrement", "Show", "Hide", "Toggle", "Select", "Reset",
];

/// Split a PascalCase string into parts
fn split_pascal_case(s: &str) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for ch in s.chars() {
        match parts.last_mut() {
            Some(current) if !ch.is_uppercase() => current.push(ch),
            _ => parts.push(ch.to_string()),
        }
    }
    parts
}

/// Convert PascalCase to snake_case
fn to_snake_case(s: &str) -> String {
    split_pascal_case(s)
        .iter()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Convert snake_case to PascalCase
fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

/// Infer a category from a variant name.
///
/// - `Did*` names are async results: `"async_result"`
/// - otherwise the parts before the first verb (after the first part):
///   `NthPrimeFetch` -> `"nth_prime"`, `CountIncrement` -> `"count"`
/// - names starting with a verb, or without one, are uncategorized
fn infer_category(name: &str) -> Option<String> {
    let parts = split_pascal_case(name);
    if parts.first().map(String::as_str) == Some("Did") {
        return Some("async_result".to_string());
    }
    if parts.len() < 2 || ACTION_VERBS.contains(&parts[0].as_str()) {
        return None;
    }

    let verb_at = parts
        .iter()
        .skip(1)
        .position(|part| ACTION_VERBS.contains(&part.as_str()) || part == "Did")?
        + 1;

    Some(to_snake_case(&parts[..verb_at].concat()))
}

fn variant_pattern(name: &Ident, variant: &ActionVariant) -> TokenStream2 {
    let ident = &variant.ident;
    match variant.fields.style {
        darling::ast::Style::Unit => quote! { #name::#ident },
        darling::ast::Style::Tuple => quote! { #name::#ident(..) },
        darling::ast::Style::Struct => quote! { #name::#ident { .. } },
    }
}

/// Derive macro for the Action trait
///
/// Generates a `name()` method that returns the variant name as a static string.
///
/// `#[action(nested)]` on a single-field tuple variant marks the field as a
/// nested action family (an enum that implements `Action` itself). For such
/// variants:
/// - `name()` returns the inner action's name
/// - `From<Inner>` is implemented for the outer enum
/// - with `infer_categories`, the category is the variant name in snake_case
///
/// With `#[action(infer_categories)]`, also generates:
/// - `category() -> Option<&'static str>` - Get action's category
/// - `category_enum() -> {Name}Category` - Get category as enum
/// - `is_{category}()` predicates for each category
/// - `{Name}Category` enum with all discovered categories
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(infer_categories)]
/// enum AppAction {
///     #[action(nested)]
///     Counter(CounterAction),
///     #[action(nested)]
///     FavoritePrimes(FavoritePrimesAction),
///     Quit,
/// }
///
/// let action = AppAction::from(CounterAction::CountIncrement);
/// assert_eq!(action.name(), "CountIncrement");
/// assert_eq!(action.category(), Some("counter"));
/// assert!(action.is_counter());
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    for v in variants.iter().filter(|v| v.nested) {
        if v.fields.style != darling::ast::Style::Tuple || v.fields.len() != 1 {
            return syn::Error::new_spanned(
                &v.ident,
                "#[action(nested)] requires a tuple variant with exactly one field",
            )
            .to_compile_error()
            .into();
        }
    }

    let name_arms = variants.iter().map(|v| {
        let variant_name = &v.ident;
        if v.nested {
            quote! {
                #name::#variant_name(inner) => compose_dispatch::Action::name(inner)
            }
        } else {
            let variant_str = variant_name.to_string();
            let pattern = variant_pattern(name, v);
            quote! { #pattern => #variant_str }
        }
    });

    let from_impls = variants.iter().filter(|v| v.nested).map(|v| {
        let variant_name = &v.ident;
        let inner = &v.fields.fields[0].ty;
        quote! {
            impl ::core::convert::From<#inner> for #name {
                fn from(action: #inner) -> Self {
                    #name::#variant_name(action)
                }
            }
        }
    });

    let mut expanded = quote! {
        impl compose_dispatch::Action for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }
        }

        #(#from_impls)*
    };

    if opts.infer_categories {
        // BTreeMap keeps category order deterministic
        let mut categories: BTreeMap<String, Vec<TokenStream2>> = BTreeMap::new();
        let mut variant_categories: Vec<(&ActionVariant, Option<String>)> = Vec::new();

        for v in variants.iter() {
            let cat = if v.skip_category {
                None
            } else if let Some(explicit) = &v.category {
                Some(explicit.clone())
            } else if v.nested {
                Some(to_snake_case(&v.ident.to_string()))
            } else {
                infer_category(&v.ident.to_string())
            };

            if let Some(category) = &cat {
                categories
                    .entry(category.clone())
                    .or_default()
                    .push(variant_pattern(name, v));
            }
            variant_categories.push((v, cat));
        }

        let category_enum_name = format_ident!("{}Category", name);
        let category_variants: Vec<_> = categories
            .keys()
            .map(|c| format_ident!("{}", to_pascal_case(c)))
            .collect();
        let category_names: Vec<_> = categories.keys().cloned().collect();

        let category_arms = variant_categories.iter().map(|(v, cat)| {
            let pattern = variant_pattern(name, v);
            match cat {
                Some(c) => quote! { #pattern => ::core::option::Option::Some(#c) },
                None => quote! { #pattern => ::core::option::Option::None },
            }
        });

        let category_enum_arms = variant_categories.iter().map(|(v, cat)| {
            let pattern = variant_pattern(name, v);
            let cat_variant = match cat {
                Some(c) => format_ident!("{}", to_pascal_case(c)),
                None => format_ident!("Uncategorized"),
            };
            quote! { #pattern => #category_enum_name::#cat_variant }
        });

        let predicates = categories.iter().map(|(cat, patterns)| {
            let predicate_name = format_ident!("is_{}", cat);
            let doc = format!(
                "Returns true if this action belongs to the `{}` category.",
                cat
            );
            quote! {
                #[doc = #doc]
                pub fn #predicate_name(&self) -> bool {
                    matches!(self, #(#patterns)|*)
                }
            }
        });

        let category_enum_doc = format!(
            "Action categories for [`{}`].\n\n\
             Use [`{}::category_enum()`] to get the category of an action.",
            name, name
        );

        expanded = quote! {
            #expanded

            #[doc = #category_enum_doc]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub enum #category_enum_name {
                #(#category_variants,)*
                /// Actions that don't belong to any specific category.
                Uncategorized,
            }

            impl #category_enum_name {
                /// Get all category values
                pub fn all() -> &'static [Self] {
                    &[#(Self::#category_variants,)* Self::Uncategorized]
                }

                /// Get category name as string
                pub fn name(&self) -> &'static str {
                    match self {
                        #(Self::#category_variants => #category_names,)*
                        Self::Uncategorized => "uncategorized",
                    }
                }
            }

            impl #name {
                /// Get the action's category (if categorized)
                pub fn category(&self) -> ::core::option::Option<&'static str> {
                    match self {
                        #(#category_arms,)*
                    }
                }

                /// Get the category as an enum value
                pub fn category_enum(&self) -> #category_enum_name {
                    match self {
                        #(#category_enum_arms,)*
                    }
                }

                #(#predicates)*
            }

            impl compose_dispatch::ActionCategory for #name {
                type Category = #category_enum_name;

                fn category(&self) -> ::core::option::Option<&'static str> {
                    #name::category(self)
                }

                fn category_enum(&self) -> Self::Category {
                    #name::category_enum(self)
                }
            }
        };
    }

    TokenStream::from(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pascal_case() {
        assert_eq!(
            split_pascal_case("NthPrimeDidLoad"),
            vec!["Nth", "Prime", "Did", "Load"]
        );
        assert!(split_pascal_case("").is_empty());
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("FavoritePrimes"), "favorite_primes");
        assert_eq!(to_snake_case("Counter"), "counter");
    }

    #[test]
    fn test_infer_category() {
        assert_eq!(infer_category("CountIncrement").as_deref(), Some("count"));
        assert_eq!(infer_category("NthPrimeFetch").as_deref(), Some("nth_prime"));
        assert_eq!(infer_category("NthPrimeDidLoad").as_deref(), Some("nth_prime"));
        assert_eq!(infer_category("NthPrimeAlertDismiss").as_deref(), Some("nth_prime_alert"));
        assert_eq!(infer_category("DidConnect").as_deref(), Some("async_result"));
        assert_eq!(infer_category("SaveFavorite"), None);
        assert_eq!(infer_category("Quit"), None);
        assert_eq!(infer_category("FavoriteThing"), None);
    }
}
