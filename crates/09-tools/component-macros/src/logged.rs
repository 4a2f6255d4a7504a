//! logged 宏实现
//!
//! 在函数体最前面插入一条 info 日志，记录所在模块、函数名与各参数的 Debug 形式，
//! 之后照常执行原函数体。

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Error, FnArg, ImplItemFn, LitStr, Pat, Result};

/// 实现 #[logged] 宏
pub fn logged_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let function = parse_macro_input!(input as ImplItemFn);

    if !args.is_empty() {
        let args = proc_macro2::TokenStream::from(args);
        return Error::new_spanned(args, "logged 不接受参数")
            .to_compile_error()
            .into();
    }

    match expand_logged(function) {
        Ok(expanded) => expanded.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand_logged(mut function: ImplItemFn) -> Result<proc_macro2::TokenStream> {
    // self 接收者与解构模式不记录
    let arguments: Vec<_> = function
        .sig
        .inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Typed(pat_type) => match pat_type.pat.as_ref() {
                Pat::Ident(pat_ident) => Some(pat_ident.ident.clone()),
                _ => None,
            },
            FnArg::Receiver(_) => None,
        })
        .collect();

    let placeholders: Vec<_> = arguments
        .iter()
        .map(|ident| format!("{}={{:?}}", ident.to_string().trim_start_matches("r#")))
        .collect();
    let message = LitStr::new(
        &format!(
            "[{{}}] 调用函数 {}，参数: [{}]",
            function.sig.ident,
            placeholders.join(", ")
        ),
        function.sig.ident.span(),
    );

    let statement = syn::parse_quote! {
        ::di_impl::__private::tracing::info!(#message, ::std::module_path!() #(, #arguments)*);
    };
    function.block.stmts.insert(0, statement);

    Ok(quote! { #function })
}
