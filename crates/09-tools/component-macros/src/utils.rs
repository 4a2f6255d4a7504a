//! 宏工具函数

use infrastructure_common::NamingConventions;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    Error, Expr, ExprLit, ExprUnary, GenericArgument, Ident, Lit, PathArguments, Result, Type,
    UnOp,
};

/// 将驼峰命名转换为蛇形命名，与运行时的注入点命名保持一致
pub fn to_snake_case(s: &str) -> String {
    NamingConventions::to_snake_case(s)
}

/// 校验并生成标识符
pub fn parse_ident(name: &str, span: Span) -> Result<Ident> {
    syn::parse_str::<Ident>(name)
        .map(|ident| Ident::new(&ident.to_string(), span))
        .map_err(|_| Error::new(span, format!("`{}` 不是合法的标识符", name)))
}

/// 生成带前缀的隐藏标识符
pub fn hidden_ident(prefix: &str, name: &str) -> Ident {
    Ident::new(&format!("__{}_{}", prefix, name), Span::call_site())
}

/// 生成复合键参数数组
///
/// 字符串、整数、浮点字面量分别映射为对应的 `KeyPart`，其他表达式经 `From` 转换。
/// 浮点参数在运行时校验，NaN 以配置错误返回。
pub fn key_array(values: &[Expr]) -> Result<TokenStream2> {
    let parts = values
        .iter()
        .map(key_part_tokens)
        .collect::<Result<Vec<_>>>()?;
    let len = parts.len();

    Ok(quote! {
        let __key: [::di_impl::KeyPart; #len] = [#(#parts),*];
    })
}

fn key_part_tokens(expr: &Expr) -> Result<TokenStream2> {
    let literal = match expr {
        Expr::Lit(ExprLit { lit, .. }) => Some(lit),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: inner,
            ..
        }) => match inner.as_ref() {
            Expr::Lit(ExprLit {
                lit: lit @ (Lit::Int(_) | Lit::Float(_)),
                ..
            }) => Some(lit),
            _ => None,
        },
        _ => None,
    };

    match literal {
        Some(Lit::Str(_)) => Ok(quote! { ::di_impl::KeyPart::from(#expr) }),
        Some(Lit::Int(int)) if int.suffix().is_empty() => Ok(quote! { ::di_impl::KeyPart::Int(#expr) }),
        Some(Lit::Int(_)) => Ok(quote! { ::di_impl::KeyPart::Int((#expr) as i64) }),
        Some(Lit::Float(float)) if float.suffix().is_empty() => {
            Ok(quote! { ::di_impl::KeyPart::float(#expr)? })
        }
        Some(Lit::Float(_)) => Ok(quote! { ::di_impl::KeyPart::float((#expr) as f64)? }),
        Some(_) => Err(Error::new_spanned(expr, "键参数只能是字符串、整数或浮点数")),
        None => Ok(quote! { ::di_impl::KeyPart::from(#expr) }),
    }
}

/// 检查类型是否为 `Self`
pub fn is_self_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path.qself.is_none() && type_path.path.is_ident("Self"),
        _ => false,
    }
}

/// 将 `Result<Self, ..>` 的成功类型替换为 `Arc<Self>`
///
/// 按末段名称识别，`anyhow::Result<Self>` 这类别名同样适用。
pub fn arc_wrapped_result(ty: &Type) -> Option<Type> {
    let mut wrapped = ty.clone();

    let Type::Path(type_path) = &mut wrapped else {
        return None;
    };
    let segment = type_path.path.segments.last_mut()?;
    if segment.ident != "Result" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &mut segment.arguments else {
        return None;
    };
    match args.args.first_mut() {
        Some(GenericArgument::Type(ok)) if is_self_type(ok) => {
            *ok = syn::parse_quote!(::std::sync::Arc<Self>);
            Some(wrapped)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::ToTokens;

    fn expr(src: &str) -> Expr {
        syn::parse_str(src).unwrap()
    }

    fn rendered(values: &[&str]) -> String {
        let values: Vec<Expr> = values.iter().map(|v| expr(v)).collect();
        key_array(&values).unwrap().to_string()
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("CacheService"), "cache_service");
        assert_eq!(to_snake_case("HTTPClient"), "http_client");
        assert_eq!(to_snake_case("ColorRepository"), "color_repository");
    }

    #[test]
    fn test_key_parts_by_literal_kind() {
        let tokens = rendered(&["\"users\"", "3", "-2", "7u8", "1.5"]);

        assert!(tokens.contains("KeyPart :: from (\"users\")"));
        assert!(tokens.contains("KeyPart :: Int (3)"));
        assert!(tokens.contains("KeyPart :: Int (- 2)"));
        assert!(tokens.contains("KeyPart :: Int ((7u8) as i64)"));
        assert!(tokens.contains("KeyPart :: float (1.5) ?"));
        assert!(tokens.contains("[:: di_impl :: KeyPart ; 5usize]"));
    }

    #[test]
    fn test_bool_key_is_rejected() {
        assert!(key_array(&[expr("true")]).is_err());
    }

    #[test]
    fn test_arc_wrapped_result() {
        let ty: Type = syn::parse_str("anyhow::Result<Self>").unwrap();
        let wrapped = arc_wrapped_result(&ty).unwrap();
        assert_eq!(
            wrapped.to_token_stream().to_string(),
            "anyhow :: Result < :: std :: sync :: Arc < Self > >"
        );

        let ty: Type = syn::parse_str("Result<Self, std::io::Error>").unwrap();
        assert!(arc_wrapped_result(&ty).is_some());

        let ty: Type = syn::parse_str("Option<Self>").unwrap();
        assert!(arc_wrapped_result(&ty).is_none());
    }

    #[test]
    fn test_parse_ident() {
        assert!(parse_ident("cache", Span::call_site()).is_ok());
        assert!(parse_ident("not valid", Span::call_site()).is_err());
    }
}
