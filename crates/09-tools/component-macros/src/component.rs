//! 组件声明宏实现

use crate::utils::{hidden_ident, to_snake_case};
use proc_macro::TokenStream;
use quote::quote;
use syn::{meta::ParseNestedMeta, parse_macro_input, DeriveInput, Generics, Ident, ItemStruct, LitStr, Result};

/// 组件配置参数
#[derive(Debug, Clone, Default)]
pub struct ComponentArgs {
    /// 自定义组件名称
    pub name: Option<String>,
    /// 组件说明，写入描述符元数据
    pub description: Option<String>,
}

impl ComponentArgs {
    fn parse_meta(&mut self, meta: ParseNestedMeta<'_>) -> Result<()> {
        if meta.path.is_ident("name") {
            let name: LitStr = meta.value()?.parse()?;
            if name.value().trim().is_empty() {
                return Err(meta.error("组件名称不能为空"));
            }
            self.name = Some(name.value());
            Ok(())
        } else if meta.path.is_ident("description") {
            let description: LitStr = meta.value()?.parse()?;
            self.description = Some(description.value());
            Ok(())
        } else {
            Err(meta.error("不支持的组件参数，可用参数: name, description"))
        }
    }
}

/// 实现 #[component] 宏
pub fn component_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut component_args = ComponentArgs::default();
    let parser = syn::meta::parser(|meta| component_args.parse_meta(meta));
    parse_macro_input!(args with parser);

    let input_struct = parse_macro_input!(input as ItemStruct);
    let declaration = generate_declaration(&input_struct.ident, &input_struct.generics, &component_args);

    let expanded = quote! {
        #input_struct

        #declaration
    };

    TokenStream::from(expanded)
}

/// 实现 #[derive(Component)] 宏
pub fn derive_component_impl(input: DeriveInput) -> TokenStream {
    let mut component_args = ComponentArgs::default();

    for attr in &input.attrs {
        if attr.path().is_ident("component") {
            if let Err(e) = attr.parse_nested_meta(|meta| component_args.parse_meta(meta)) {
                return e.to_compile_error().into();
            }
        }
    }

    TokenStream::from(generate_declaration(&input.ident, &input.generics, &component_args))
}

/// 生成 `Component` 实现与启动时的组件登记
fn generate_declaration(
    struct_name: &Ident,
    generics: &Generics,
    args: &ComponentArgs,
) -> proc_macro2::TokenStream {
    let struct_name_string = struct_name.to_string();
    let component_name = args.name.as_deref().unwrap_or(&struct_name_string);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let component_impl = quote! {
        impl #impl_generics ::di_impl::Component for #struct_name #ty_generics #where_clause {
            fn name(&self) -> &'static str {
                #component_name
            }
        }
    };

    // 泛型组件没有唯一的具体类型可登记
    if !generics.params.is_empty() {
        return component_impl;
    }

    let registration_fn_name = hidden_ident("declare_component", &to_snake_case(&struct_name_string));
    let description = args.description.as_ref().map(|description| {
        quote! { .with_metadata("description", #description) }
    });

    quote! {
        #component_impl

        // 使用 ctor 在程序启动时登记组件
        #[::ctor::ctor]
        fn #registration_fn_name() {
            let descriptor = ::di_impl::ComponentDescriptor::new::<#struct_name>(#component_name)
                #description;
            let registry = ::di_impl::get_global_component_registry();

            if let Err(e) = ::di_impl::GlobalComponentRegistry::register_component_descriptor(&*registry, descriptor) {
                eprintln!("Failed to register component {}: {}", #component_name, e);
            }
        }
    }
}
