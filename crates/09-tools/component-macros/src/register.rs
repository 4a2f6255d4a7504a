//! register 宏实现
//!
//! 把关联构造函数改写为经全局应用上下文注册的版本：
//! 原函数改名隐藏，同名包装函数以装饰参数构成复合键，
//! 首次调用时执行原函数，之后返回同一个 `Arc<Self>`。

use crate::utils::{arc_wrapped_result, hidden_ident, is_self_type, key_array};
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    parse_macro_input, punctuated::Punctuated, Error, Expr, FnArg, ImplItemFn, Pat, PatIdent,
    Result, ReturnType, Token, Visibility,
};

/// 实现 #[register] 宏
pub fn register_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let key_args = parse_macro_input!(args with Punctuated::<Expr, Token![,]>::parse_terminated);
    let constructor = parse_macro_input!(input as ImplItemFn);

    match expand_register(key_args.into_iter().collect(), constructor) {
        Ok(expanded) => expanded.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand_register(key_args: Vec<Expr>, constructor: ImplItemFn) -> Result<proc_macro2::TokenStream> {
    let sig = &constructor.sig;

    if let Some(asyncness) = &sig.asyncness {
        return Err(Error::new_spanned(asyncness, "register 不支持 async 构造函数"));
    }
    if let Some(FnArg::Receiver(receiver)) = sig.inputs.first() {
        return Err(Error::new_spanned(
            receiver,
            "register 只能用于关联构造函数，不能带 self 接收者",
        ));
    }

    let ReturnType::Type(_, return_type) = &sig.output else {
        return Err(Error::new_spanned(
            &sig.ident,
            "register 构造函数必须返回 Self 或 Result<Self, E>",
        ));
    };

    let (output, fallible) = if is_self_type(return_type) {
        (
            quote! { ::std::result::Result<::std::sync::Arc<Self>, ::di_impl::DependencyError> },
            false,
        )
    } else if let Some(wrapped) = arc_wrapped_result(return_type) {
        (quote! { #wrapped }, true)
    } else {
        return Err(Error::new_spanned(
            return_type,
            "register 构造函数必须返回 Self 或 Result<Self, E>",
        ));
    };

    let hidden = hidden_ident("register", &sig.ident.to_string());

    // 原函数：改名、私有、不出现在文档中
    let mut original = constructor.clone();
    original.sig.ident = hidden.clone();
    original.vis = Visibility::Inherited;
    original.attrs.retain(|attr| !attr.path().is_ident("doc"));
    original.attrs.push(syn::parse_quote!(#[doc(hidden)]));

    // 包装函数：参数统一改名，便于转发
    let mut wrapper_sig = sig.clone();
    wrapper_sig.output = syn::parse_quote!(-> #output);
    let mut forwarded = Vec::new();
    for (index, input) in wrapper_sig.inputs.iter_mut().enumerate() {
        if let FnArg::Typed(pat_type) = input {
            let name = format_ident!("__arg{}", index);
            *pat_type.pat = Pat::Ident(PatIdent {
                attrs: Vec::new(),
                by_ref: None,
                mutability: None,
                ident: name.clone(),
                subpat: None,
            });
            forwarded.push(name);
        }
    }

    let type_params: Vec<_> = sig
        .generics
        .type_params()
        .map(|param| &param.ident)
        .chain(sig.generics.const_params().map(|param| &param.ident))
        .collect();
    let turbofish = if type_params.is_empty() {
        quote! {}
    } else {
        quote! { ::<#(#type_params),*> }
    };

    let call = quote! { Self::#hidden #turbofish(#(#forwarded),*) };
    let (factory, error_type) = if fallible {
        (quote! { move || #call }, quote! { _ })
    } else {
        (
            quote! { move || ::std::result::Result::Ok(#call) },
            quote! { ::di_impl::DependencyError },
        )
    };

    let key = key_array(&key_args)?;
    let attrs = &constructor.attrs;
    let vis = &constructor.vis;

    Ok(quote! {
        #original

        #(#attrs)*
        #vis #wrapper_sig {
            #key
            ::di_impl::register::<Self, _, #error_type>(&__key, #factory)
        }
    })
}
