use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Expr, FnArg, Ident, ItemFn, LitStr, Token,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Declares a function as a method of a named dispatcher.
///
/// The function must take the dispatcher's argument tuple as its single
/// parameter and return `Result<R, BoxError>`. The declaration is installed
/// by `multimeth::install_declarations`.
///
/// # Example
///
/// ```rust,ignore
/// #[multimeth::method(dispatcher = "combine", key = ("int", "int"))]
/// fn combine_ints((x, y): (Value, Value)) -> Result<Value, BoxError> {
///     Ok(x * y)
/// }
///
/// #[multimeth::method(dispatcher = "combine", key = default)]
/// fn combine_other(_: (Value, Value)) -> Result<Value, BoxError> {
///     Ok(Value::Null)
/// }
/// ```
#[proc_macro_attribute]
pub fn method(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as MethodArgs);
    let input = parse_macro_input!(item as ItemFn);

    if let Err(err) = check_signature(&input) {
        return err.to_compile_error().into();
    }

    let fn_name = &input.sig.ident;
    let dispatcher = &args.dispatcher;
    let selector = match &args.key {
        Key::Default => quote! { ::multimeth::DEFAULT },
        Key::Value(expr) => quote! { #expr },
    };

    let expanded = quote! {
        #input

        ::multimeth::declare_method!(#dispatcher, #selector, #fn_name);
    };

    TokenStream::from(expanded)
}

fn check_signature(input: &ItemFn) -> syn::Result<()> {
    let sig = &input.sig;
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "method functions must be synchronous",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "method functions cannot be generic",
        ));
    }
    match sig.inputs.len() {
        1 => match sig.inputs.first() {
            Some(FnArg::Receiver(receiver)) => Err(syn::Error::new_spanned(
                receiver,
                "method functions cannot take `self`",
            )),
            _ => Ok(()),
        },
        _ => Err(syn::Error::new_spanned(
            &sig.inputs,
            "method functions take the argument tuple as their single parameter: fn(args: (A, B))",
        )),
    }
}

enum Key {
    Default,
    Value(Expr),
}

struct MethodArgs {
    dispatcher: LitStr,
    key: Key,
}

impl Parse for MethodArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut dispatcher = None;
        let mut key = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "dispatcher" => {
                    let lit: LitStr = input.parse()?;
                    dispatcher = Some(lit);
                }
                "key" => {
                    let expr: Expr = input.parse()?;
                    key = Some(if is_default_marker(&expr) {
                        Key::Default
                    } else {
                        Key::Value(expr)
                    });
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        let dispatcher = dispatcher
            .ok_or_else(|| input.error("missing `dispatcher = \"name\"`"))?;
        let key = key.ok_or_else(|| input.error("missing `key = <expr>` or `key = default`"))?;

        Ok(MethodArgs { dispatcher, key })
    }
}

fn is_default_marker(expr: &Expr) -> bool {
    match expr {
        Expr::Path(path) => path.qself.is_none() && path.path.is_ident("default"),
        _ => false,
    }
}
