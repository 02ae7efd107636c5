/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */
#![forbid(unsafe_code)]

//! Courier Macro Library
//!
//! This library provides procedural macros for the Courier actor framework.
//! It includes macros to derive common traits and boilerplate code for Courier
//! messages and actor state types.
//!
//! # Message Macro
//!
//! The [`courier_message`] macro simplifies creating message types for actor
//! communication:
//!
//! ```ignore
//! #[courier_message]
//! pub struct Ping;
//!
//! #[courier_message]
//! pub struct Increment {
//!     pub amount: u32,
//! }
//! ```
//!
//! This expands to `#[derive(Clone, Debug)]` (for traits not already present)
//! plus a compile-time assertion that the type is `Send + Sync + 'static`.
//!
//! # Actor Macro
//!
//! The [`courier_actor`] macro simplifies creating actor state types:
//!
//! ```ignore
//! #[courier_actor]
//! pub struct Counter {
//!     count: i32,
//! }
//! ```

use proc_macro::TokenStream;

use quote::quote;
use syn::{parse_macro_input, DeriveInput};

fn has_derive(input: &DeriveInput, trait_name: &str) -> bool {
    input.attrs.iter().any(|attr| {
        if attr.path().is_ident("derive") {
            let mut found = false;
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident(trait_name) {
                    found = true;
                }
                Ok(())
            });
            found
        } else {
            false
        }
    })
}

/// Configuration options parsed from `#[courier_actor(...)]` attributes.
#[derive(Default)]
struct ActorConfig {
    /// Skip deriving Default (user will implement it manually).
    no_default: bool,
}

impl ActorConfig {
    /// Parse configuration from attribute tokens.
    fn parse(attr: &TokenStream) -> Self {
        let mut config = Self::default();

        let attr_string = attr.to_string();
        for part in attr_string.split(',') {
            if part.trim() == "no_default" {
                config.no_default = true;
            }
        }

        config
    }
}

/// A procedural macro to derive the necessary traits for a Courier message.
///
/// This macro automatically implements the traits required for a type to be
/// used as a message in the Courier actor framework. It ensures compile-time
/// verification that the message type satisfies `Send + Sync` bounds, which
/// the type-erased [`ActorMessage`] blanket impl relies on.
///
/// # Usage
///
/// ```ignore
/// use courier_macro::courier_message;
///
/// #[courier_message]
/// pub struct Ping;
///
/// #[courier_message]
/// pub struct Tally {
///     pub count: usize,
/// }
/// ```
///
/// This expands to:
/// - `#[derive(Clone, Debug)]` (if not already present)
/// - A compile-time assertion that the type is `Send + Sync + 'static`
#[proc_macro_attribute]
pub fn courier_message(_attr: TokenStream, item: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree.
    let input = parse_macro_input!(item as DeriveInput);

    // Get the name and generics of the struct.
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    // Determine which traits need to be derived
    let need_clone = !has_derive(&input, "Clone");
    let need_debug = !has_derive(&input, "Debug");

    // Build the list of traits to derive
    let derives = {
        let mut traits = Vec::new();
        if need_clone {
            traits.push(quote!(Clone));
        }
        if need_debug {
            traits.push(quote!(Debug));
        }
        if traits.is_empty() {
            quote!()
        } else {
            quote!(#[derive(#(#traits),*)])
        }
    };

    // Generate a unique identifier for the static assertion to avoid conflicts
    let assert_ident = quote::format_ident!("_AssertCourierMessage_{}", name);

    let expanded = quote! {
        #derives
        #input

        // Compile-time assertion that the message type satisfies Send + Sync + 'static.
        #[doc(hidden)]
        #[allow(dead_code, non_camel_case_types, non_snake_case, clippy::needless_lifetimes)]
        const _: () = {
            fn #assert_ident #impl_generics () #where_clause {
                fn assert_bounds<T: Send + Sync + 'static>() {}
                assert_bounds::<#name #ty_generics>();
            }
        };
    };

    // Return the generated tokens.
    TokenStream::from(expanded)
}

/// A procedural macro to derive boilerplate traits for Courier actor state.
///
/// Actor state types must implement `Default` because actors are initialized
/// with their default state before handlers are registered. When using
/// `no_default`, you must provide your own `Default` implementation.
///
/// # Usage
///
/// ```ignore
/// use courier_macro::courier_actor;
///
/// #[courier_actor]
/// pub struct Counter {
///     count: i32,
/// }
/// ```
///
/// This expands to:
/// - `#[derive(Default, Debug)]` (only traits not already present)
/// - A compile-time assertion that the type is `Send + 'static`
///
/// # Options
///
/// ## `no_default`
///
/// Skip deriving `Default` when you need to implement it manually (e.g., when
/// a field's type doesn't implement `Default`):
///
/// ```ignore
/// #[courier_actor(no_default)]
/// struct Printer {
///     out: std::io::Stdout,
/// }
/// ```
#[proc_macro_attribute]
pub fn courier_actor(attr: TokenStream, item: TokenStream) -> TokenStream {
    // Parse configuration from attributes
    let config = ActorConfig::parse(&attr);

    // Parse the input tokens into a syntax tree.
    let input = parse_macro_input!(item as DeriveInput);

    // Get the name and generics of the struct.
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    // Determine which traits need to be derived
    let need_default = !config.no_default && !has_derive(&input, "Default");
    let need_debug = !has_derive(&input, "Debug");

    // Build the list of traits to derive
    let derives = {
        let mut traits = Vec::new();
        if need_default {
            traits.push(quote!(Default));
        }
        if need_debug {
            traits.push(quote!(Debug));
        }
        if traits.is_empty() {
            quote!()
        } else {
            quote!(#[derive(#(#traits),*)])
        }
    };

    // Generate a unique identifier for the static assertion to avoid conflicts
    let assert_ident = quote::format_ident!("_AssertCourierActor_{}", name);

    let expanded = quote! {
        #derives
        #input

        // Compile-time assertion that the actor state satisfies Send + 'static.
        #[doc(hidden)]
        #[allow(dead_code, non_camel_case_types, non_snake_case, clippy::needless_lifetimes)]
        const _: () = {
            fn #assert_ident #impl_generics () #where_clause {
                fn assert_bounds<T: Send + 'static>() {}
                assert_bounds::<#name #ty_generics>();
            }
        };
    };

    // Return the generated tokens.
    TokenStream::from(expanded)
}
