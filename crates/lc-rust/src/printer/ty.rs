use crate::printer::ConstantsPrinter;
use lc_core::ReturnCategory;
use proc_macro2::TokenStream;
use quote::quote;

impl ConstantsPrinter {
    pub fn print_return_type(&self, category: ReturnCategory) -> TokenStream {
        match category {
            ReturnCategory::Boolean => quote!(bool),
            ReturnCategory::Int => quote!(i32),
            ReturnCategory::Double => quote!(f64),
            ReturnCategory::Float => quote!(f32),
            ReturnCategory::String => quote!(String),
            ReturnCategory::StringArray => quote!(Rc<[String]>),
            ReturnCategory::StringMap => quote!(Rc<[(String, String)]>),
        }
    }

    /// Variant of the generated `CachedConstant` enum holding values of `category`.
    pub fn print_cache_variant(&self, category: ReturnCategory) -> TokenStream {
        match category {
            ReturnCategory::Boolean => quote!(CachedConstant::Boolean),
            ReturnCategory::Int => quote!(CachedConstant::Int),
            ReturnCategory::Double => quote!(CachedConstant::Double),
            ReturnCategory::Float => quote!(CachedConstant::Float),
            ReturnCategory::String => quote!(CachedConstant::String),
            ReturnCategory::StringArray => quote!(CachedConstant::StringArray),
            ReturnCategory::StringMap => quote!(CachedConstant::StringMap),
        }
    }

    /// `get_map`, `get_string_array`, ... for the lookup trait.
    pub fn lookup_method_name(&self, category: ReturnCategory) -> &'static str {
        match category {
            ReturnCategory::Boolean => "get_boolean",
            ReturnCategory::Int => "get_int",
            ReturnCategory::Double => "get_double",
            ReturnCategory::Float => "get_float",
            ReturnCategory::String => "get_string",
            ReturnCategory::StringArray => "get_string_array",
            ReturnCategory::StringMap => "get_map",
        }
    }
}
