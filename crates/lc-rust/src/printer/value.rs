use crate::printer::ConstantsPrinter;
use lc_core::artifact::GeneratedMember;
use lc_core::{MaterializedValue, ReturnCategory};
use proc_macro2::{Span, TokenStream};
use quote::quote;

impl ConstantsPrinter {
    pub fn print_int(&self, value: i32) -> TokenStream {
        if value == i32::MIN {
            return quote!(i32::MIN);
        }
        let lit = syn::LitInt::new(&format!("{}i32", value.unsigned_abs()), Span::call_site());
        if value < 0 {
            quote!(-#lit)
        } else {
            quote!(#lit)
        }
    }

    pub fn print_double(&self, value: f64) -> TokenStream {
        if value.is_nan() {
            return quote!(f64::NAN);
        }
        if value.is_infinite() {
            return if value > 0.0 { quote!(f64::INFINITY) } else { quote!(f64::NEG_INFINITY) };
        }
        let lit = syn::LitFloat::new(&format!("{:?}f64", value.abs()), Span::call_site());
        if value.is_sign_negative() {
            quote!(-#lit)
        } else {
            quote!(#lit)
        }
    }

    /// Single-precision literal, tagged `f32`.
    pub fn print_float(&self, value: f32) -> TokenStream {
        if value.is_nan() {
            return quote!(f32::NAN);
        }
        if value.is_infinite() {
            return if value > 0.0 { quote!(f32::INFINITY) } else { quote!(f32::NEG_INFINITY) };
        }
        let lit = syn::LitFloat::new(&format!("{:?}f32", value.abs()), Span::call_site());
        if value.is_sign_negative() {
            quote!(-#lit)
        } else {
            quote!(#lit)
        }
    }

    pub fn print_string(&self, value: &str) -> TokenStream {
        let lit = syn::LitStr::new(value, Span::call_site());
        quote!(#lit.to_string())
    }

    /// Expression building an array or map; evaluated once per instance.
    fn print_composite(&self, value: &MaterializedValue) -> TokenStream {
        match value {
            MaterializedValue::StringArray(array) => {
                let items = array.values.iter().map(|item| self.print_string(item));
                quote!(Rc::from(vec![#(#items),*]))
            }
            MaterializedValue::StringMap(map) => {
                let entries = map.entries.iter().map(|(key, value)| {
                    let key = self.print_string(key);
                    let value = self.print_string(value);
                    quote!((#key, #value))
                });
                quote!(Rc::from(vec![#(#entries),*]))
            }
            _ => self.print_empty(value.category()),
        }
    }

    /// Value returned by a member that has neither a property nor a default.
    pub fn print_empty(&self, category: ReturnCategory) -> TokenStream {
        match category {
            ReturnCategory::Boolean => quote!(false),
            ReturnCategory::Int => quote!(0i32),
            ReturnCategory::Double => quote!(0.0f64),
            ReturnCategory::Float => quote!(0.0f32),
            ReturnCategory::String => quote!(String::new()),
            ReturnCategory::StringArray => quote!(Rc::from(Vec::<String>::new())),
            ReturnCategory::StringMap => quote!(Rc::from(Vec::<(String, String)>::new())),
        }
    }

    /// Body of the accessor implementing `member`.
    pub fn print_member_body(&self, member: &GeneratedMember) -> TokenStream {
        let Some(value) = &member.value else {
            return self.print_empty(member.id.category);
        };
        match value {
            MaterializedValue::Boolean(value) => quote!(#value),
            MaterializedValue::Int(value) => self.print_int(*value),
            MaterializedValue::Double(value) => self.print_double(*value),
            MaterializedValue::Float(value) => self.print_float(*value),
            MaterializedValue::String(value) => self.print_string(value),
            MaterializedValue::StringArray(_) | MaterializedValue::StringMap(_) => {
                let cache_key = format!("{}:{}", value.category(), value.cache_key().unwrap_or_default());
                let variant = self.print_cache_variant(value.category());
                let ty = self.print_return_type(value.category());
                let build = self.print_composite(value);
                quote! {
                    if let Some(#variant(cached)) = self.cache.borrow().get(#cache_key) {
                        return cached.clone();
                    }
                    let value: #ty = #build;
                    self.cache.borrow_mut().insert(#cache_key.to_string(), #variant(value.clone()));
                    value
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_literals_carry_their_type() {
        let printer = ConstantsPrinter::new();
        assert_eq!(printer.print_int(-1).to_string(), "- 1i32");
        assert_eq!(printer.print_int(i32::MIN).to_string(), "i32 :: MIN");
        assert_eq!(printer.print_float(1.0).to_string(), "1.0f32");
        assert_eq!(printer.print_double(-0.5).to_string(), "- 0.5f64");
        assert_eq!(printer.print_double(f64::MAX).to_string(), "1.7976931348623157e308f64");
        assert_eq!(printer.print_float(f32::NAN).to_string(), "f32 :: NAN");
    }

    #[test]
    fn strings_are_escaped() {
        let printer = ConstantsPrinter::new();
        let printed = printer.print_string("say \"hi\"\n").to_string();
        assert!(printed.starts_with("\"say \\\"hi\\\"\\n\""), "{printed}");
    }
}
