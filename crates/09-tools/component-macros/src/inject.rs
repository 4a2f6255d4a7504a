//! inject 宏实现

use crate::utils::{hidden_ident, key_array, parse_ident, to_snake_case};
use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, Error, Expr, Ident, ItemStruct, LitStr, Result, Token, TypePath,
};

/// 注入参数：被注入的组件类型、构造参数与可选的注入点名称
pub struct InjectArgs {
    pub reference: TypePath,
    pub values: Vec<Expr>,
    pub attribute: Option<LitStr>,
}

impl Parse for InjectArgs {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let reference: TypePath = input.parse()?;
        let mut values = Vec::new();
        let mut attribute = None;

        while !input.is_empty() {
            input.parse::<Token![,]>()?;
            if input.is_empty() {
                break;
            }

            if input.peek(Ident) && input.peek2(Token![=]) {
                let key: Ident = input.parse()?;
                if key != "name" {
                    return Err(Error::new_spanned(key, "不支持的注入参数，可用参数: name"));
                }
                input.parse::<Token![=]>()?;
                attribute = Some(input.parse()?);
            } else {
                values.push(input.parse()?);
            }
        }

        Ok(Self {
            reference,
            values,
            attribute,
        })
    }
}

/// 实现 #[inject] 宏
pub fn inject_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let inject_args = parse_macro_input!(args as InjectArgs);
    let host = parse_macro_input!(input as ItemStruct);

    match expand_inject(inject_args, host) {
        Ok(expanded) => expanded.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand_inject(args: InjectArgs, host: ItemStruct) -> Result<proc_macro2::TokenStream> {
    if !host.generics.params.is_empty() {
        return Err(Error::new_spanned(&host.generics, "inject 不支持泛型宿主"));
    }

    let reference = &args.reference;
    let Some(reference_segment) = reference.path.segments.last() else {
        return Err(Error::new_spanned(reference, "缺少被注入的组件类型"));
    };

    let (attribute, span) = match &args.attribute {
        Some(name) => (name.value(), name.span()),
        None => (
            to_snake_case(&reference_segment.ident.to_string()),
            reference_segment.ident.span(),
        ),
    };
    let accessor = parse_ident(&attribute, span)?;

    let host_name = &host.ident;
    let vis = &host.vis;
    let key = key_array(&args.values)?;
    let doc = format!("注入点 `{}`：解析或构造 `{}` 实例", attribute, quote!(#reference));
    let declare_fn = hidden_ident(
        "declare_injection_site",
        &format!("{}_{}", to_snake_case(&host_name.to_string()), attribute),
    );

    Ok(quote! {
        #host

        impl #host_name {
            #[doc = #doc]
            #vis fn #accessor() -> ::di_impl::DependencyResult<::std::sync::Arc<#reference>> {
                #key
                ::di_impl::inject_as::<Self, #reference>(#attribute, &__key)
            }
        }

        // 启动时登记注入点，供启动器预先装配
        #[::ctor::ctor]
        fn #declare_fn() {
            ::di_impl::declare_injection_site(::di_impl::SiteDeclaration {
                host: ::std::concat!(::std::module_path!(), "::", ::std::stringify!(#host_name)),
                attribute: #attribute,
                wire: || #host_name::#accessor().map(|_| ()),
            });
        }
    })
}
