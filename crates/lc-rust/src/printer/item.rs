use crate::printer::{artifact_module_name, ConstantsPrinter};
use lc_core::artifact::GeneratedArtifact;
use lc_core::lookup::LookupTable;
use lc_core::{InterfaceOutput, Result, ReturnCategory};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

impl ConstantsPrinter {
    fn module_prelude(&self) -> TokenStream {
        quote! {
            #![allow(non_snake_case, non_camel_case_types, dead_code, unused_imports)]

            use std::cell::RefCell;
            use std::collections::HashMap;
            use std::rc::Rc;
        }
    }

    fn trait_ident(&self, output: &InterfaceOutput) -> Result<proc_macro2::Ident> {
        self.print_ident(&output.type_prefix)
    }

    fn lookup_trait_ident(&self, output: &InterfaceOutput) -> Result<proc_macro2::Ident> {
        self.print_ident(&format!("{}Lookup", output.type_prefix))
    }

    /// `mod.rs` of an interface: trait, helper types, lookup trait, locale modules and factory.
    pub fn print_interface_module(&self, output: &InterfaceOutput) -> Result<TokenStream> {
        let prelude = self.module_prelude();
        let trait_name = self.trait_ident(output)?;
        let interface = &output.interface;

        let signatures: Vec<_> = output
            .methods
            .iter()
            .map(|method| {
                let name = self.print_ident(&method.name)?;
                let ty = self.print_return_type(method.category);
                Ok::<_, lc_core::Error>(quote!(fn #name(&self) -> #ty;))
            })
            .collect::<Result<_>>()?;

        let lookup_trait = match &output.lookup {
            Some(_) => {
                let lookup_name = self.lookup_trait_ident(output)?;
                let methods = ReturnCategory::LOOKUP_ORDER.iter().map(|category| {
                    let name = format_ident!("{}", self.lookup_method_name(*category));
                    let ty = self.print_return_type(*category);
                    quote!(fn #name(&self, name: &str) -> Result<#ty, MissingConstant>;)
                });
                quote! {
                    /// By-name access to the constants of
                    #[doc = #interface]
                    pub trait #lookup_name: #trait_name {
                        #(#methods)*
                    }
                }
            }
            None => quote!(),
        };

        let mut modules = Vec::new();
        for artifact in &output.artifacts {
            let module = format_ident!("{}", artifact_module_name(&output.type_prefix, &artifact.locale));
            let type_name = self.print_ident(&artifact.type_name)?;
            modules.push(quote! {
                mod #module;
                pub use #module::#type_name;
            });
        }

        let factory = self.print_factory(output)?;

        Ok(quote! {
            #prelude

            /// Localized constants of
            #[doc = #interface]
            pub trait #trait_name {
                #(#signatures)*
            }

            #[derive(Debug, Clone, PartialEq, Eq)]
            pub struct MissingConstant {
                pub name: String,
                pub interface: &'static str,
            }

            impl std::fmt::Display for MissingConstant {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(
                        f,
                        "Cannot find constant '{}'; expecting a method name (interface {})",
                        self.name, self.interface
                    )
                }
            }

            impl std::error::Error for MissingConstant {}

            #[derive(Debug, Clone)]
            pub enum CachedConstant {
                Boolean(bool),
                Int(i32),
                Double(f64),
                Float(f32),
                String(String),
                StringArray(Rc<[String]>),
                StringMap(Rc<[(String, String)]>),
            }

            #lookup_trait

            #(#modules)*

            #factory
        })
    }

    fn print_factory(&self, output: &InterfaceOutput) -> Result<TokenStream> {
        let factory_name = self.print_ident(&output.factory.type_name)?;
        let returned = match &output.lookup {
            Some(_) => self.lookup_trait_ident(output)?,
            None => self.trait_ident(output)?,
        };
        let arms: Vec<_> = output
            .factory
            .entries
            .iter()
            .map(|entry| {
                let locale = &entry.locale;
                let type_name = self.print_ident(&entry.type_name)?;
                Ok::<_, lc_core::Error>(quote! {
                    #locale => Some(Box::new(#type_name::new()) as Box<dyn #returned>),
                })
            })
            .collect::<Result<_>>()?;
        let locales: Vec<&str> = output.factory.locales().collect();

        Ok(quote! {
            pub struct #factory_name;

            impl #factory_name {
                /// Implementation for exactly `locale`, or `None`.
                pub fn create(locale: &str) -> Option<Box<dyn #returned>> {
                    match locale {
                        #(#arms)*
                        _ => None,
                    }
                }

                /// Uses the `LOCALE` environment variable as the locale name.
                pub fn create_from_env() -> Option<Box<dyn #returned>> {
                    let locale = std::env::var("LOCALE").ok()?;
                    Self::create(&locale)
                }

                pub fn locales() -> &'static [&'static str] {
                    &[#(#locales),*]
                }
            }
        })
    }

    /// One per-locale file: the implementing struct and its trait impls.
    pub fn print_artifact_module(&self, output: &InterfaceOutput, artifact: &GeneratedArtifact) -> Result<TokenStream> {
        let prelude = self.module_prelude();
        let trait_name = self.trait_ident(output)?;
        let type_name = self.print_ident(&artifact.type_name)?;
        let has_cache = artifact.needs_cache || output.lookup.is_some();

        let accessors: Vec<_> = artifact
            .members
            .iter()
            .map(|member| {
                let name = self.print_ident(&member.id.name)?;
                let ty = self.print_return_type(member.id.category);
                let body = self.print_member_body(member);
                Ok::<_, lc_core::Error>(quote! {
                    fn #name(&self) -> #ty {
                        #body
                    }
                })
            })
            .collect::<Result<_>>()?;

        let (fields, init) = if has_cache {
            (
                quote!({ cache: RefCell<HashMap<String, CachedConstant>> }),
                quote!({ cache: RefCell::new(HashMap::new()) }),
            )
        } else {
            (quote!(;), quote!())
        };

        let lookup_impl = match &output.lookup {
            Some(tables) => {
                let lookup_name = self.lookup_trait_ident(output)?;
                let methods: Vec<_> = ReturnCategory::LOOKUP_ORDER
                    .iter()
                    .map(|category| self.print_lookup_method(output, *category, tables.table(*category)))
                    .collect::<Result<_>>()?;
                quote! {
                    impl #lookup_name for #type_name {
                        #(#methods)*
                    }
                }
            }
            None => quote!(),
        };

        let lookup_import = match &output.lookup {
            Some(_) => {
                let lookup_name = self.lookup_trait_ident(output)?;
                quote!(use super::#lookup_name;)
            }
            None => quote!(),
        };

        let locale = &artifact.locale;
        Ok(quote! {
            #prelude

            use super::{CachedConstant, MissingConstant, #trait_name};
            #lookup_import

            #[doc = #locale]
            #[derive(Debug, Default)]
            pub struct #type_name #fields

            impl #type_name {
                pub fn new() -> Self {
                    Self #init
                }
            }

            impl #trait_name for #type_name {
                #(#accessors)*
            }

            #lookup_impl
        })
    }

    /// Name dispatch for one category; unknown names fail with `MissingConstant`.
    fn print_lookup_method(
        &self,
        output: &InterfaceOutput,
        category: ReturnCategory,
        table: Option<&LookupTable>,
    ) -> Result<TokenStream> {
        let method = format_ident!("{}", self.lookup_method_name(category));
        let ty = self.print_return_type(category);
        let interface = &output.interface;
        let missing = quote! {
            Err(MissingConstant {
                name: name.to_string(),
                interface: #interface,
            })
        };

        let Some(table) = table else {
            return Ok(quote! {
                fn #method(&self, name: &str) -> Result<#ty, MissingConstant> {
                    #missing
                }
            });
        };

        let arms: Vec<_> = table
            .entries
            .iter()
            .map(|entry| {
                let key = &entry.name;
                let accessor = self.print_ident(&entry.accessor.name)?;
                Ok::<_, lc_core::Error>(quote!(#key => self.#accessor(),))
            })
            .collect::<Result<_>>()?;
        let dispatch = quote! {
            match name {
                #(#arms)*
                _ => return #missing,
            }
        };

        if !self.lookup_cache.caches(category) {
            return Ok(quote! {
                fn #method(&self, name: &str) -> Result<#ty, MissingConstant> {
                    Ok(#dispatch)
                }
            });
        }

        let variant = self.print_cache_variant(category);
        let prefix = format!("lookup:{}:", category);
        Ok(quote! {
            fn #method(&self, name: &str) -> Result<#ty, MissingConstant> {
                let cache_key = format!("{}{}", #prefix, name);
                if let Some(#variant(cached)) = self.cache.borrow().get(&cache_key) {
                    return Ok(cached.clone());
                }
                let value: #ty = #dispatch;
                self.cache.borrow_mut().insert(cache_key, #variant(value.clone()));
                Ok(value)
            }
        })
    }
}
