use yew::prelude::*;

use crate::state::{Banner, Timeout};

#[derive(Properties, PartialEq)]
pub struct MessageBannerProps {
    pub banner: Option<Banner>,
    /// Emitted with the banner id once its time is up.
    pub on_expire: Callback<u64>,
}

#[function_component]
pub fn MessageBanner(props: &MessageBannerProps) -> Html {
    {
        let expiry = props.banner.as_ref().map(|b| (b.id, b.ttl_ms));
        let on_expire = props.on_expire.clone();
        use_effect_with(expiry, move |expiry| {
            let timer = expiry.map(|(id, ttl)| Timeout::start(ttl, move || on_expire.emit(id)));
            move || drop(timer)
        });
    }

    let Some(banner) = &props.banner else {
        return html! {};
    };
    let onclick = {
        let on_expire = props.on_expire.clone();
        let id = banner.id;
        Callback::from(move |_| on_expire.emit(id))
    };
    html! {
        <div class={banner.css_class()} role="status" {onclick}>
            { banner.text.clone() }
        </div>
    }
}
