use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};
use yew::prelude::*;
use yew_hooks::use_event_with_window;

pub const REVEAL_SELECTOR: &str = ".product-card, .gallery__item, .stat";
pub const STAGGERED_GROUPS: [&str; 2] = [".product-card", ".gallery__item"];
pub const ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const THRESHOLD: f64 = 0.1;

pub fn stagger_delay(index: usize) -> String {
    format!("{}s", index as f64 / 10.0)
}

pub fn anchor_target(href: &str) -> Option<&str> {
    (href.starts_with('#') && href.len() > 1).then_some(href)
}

pub fn scroll_into_view_smooth(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

pub fn scroll_to_id(id: &str) {
    if let Some(element) = document().and_then(|d| d.get_element_by_id(id)) {
        scroll_into_view_smooth(&element);
    }
}

fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

fn for_each_html(document: &Document, selector: &str, mut f: impl FnMut(usize, &HtmlElement)) {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return;
    };
    for index in 0..nodes.length() {
        if let Some(element) = nodes
            .item(index)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        {
            f(index as usize, &element);
        }
    }
}

fn show(element: &HtmlElement) {
    let style = element.style();
    let _ = style.set_property("opacity", "1");
    let _ = style.set_property("transform", "translateY(0)");
}

pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl RevealObserver {
    pub fn install(document: &Document) -> Option<Self> {
        let callback = Closure::wrap(Box::new(|entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                if let Some(element) = target.dyn_ref::<HtmlElement>() {
                    show(element);
                }
                observer.unobserve(&target);
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_root_margin(ROOT_MARGIN);
        init.set_threshold(&JsValue::from_f64(THRESHOLD));

        let observer =
            match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
                Ok(observer) => observer,
                Err(e) => {
                    warn!("IntersectionObserver unavailable, revealing everything: {:?}", e);
                    for_each_html(document, REVEAL_SELECTOR, |_, el| show(el));
                    return None;
                }
            };

        for_each_html(document, REVEAL_SELECTOR, |_, el| {
            let style = el.style();
            let _ = style.set_property("opacity", "0");
            let _ = style.set_property("transform", "translateY(30px)");
            let _ = style.set_property("transition", "opacity 0.6s ease, transform 0.6s ease");
            observer.observe(el);
        });

        for group in STAGGERED_GROUPS {
            for_each_html(document, group, |index, el| {
                let _ = el.style().set_property("transition-delay", &stagger_delay(index));
            });
        }

        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

#[hook]
pub fn use_reveal_on_scroll() {
    use_effect_with_deps(
        |_| {
            let observer = document().and_then(|d| RevealObserver::install(&d));
            move || drop(observer)
        },
        (),
    );
}

#[hook]
pub fn use_smooth_anchor_scroll() {
    use_event_with_window("click", |e: MouseEvent| {
        let Some(anchor) = e
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest("a[href^='#']").ok().flatten())
        else {
            return;
        };
        let Some(href) = anchor.get_attribute("href") else {
            return;
        };
        let Some(selector) = anchor_target(&href) else {
            return;
        };
        e.prevent_default();
        if let Some(target) = document().and_then(|d| d.query_selector(selector).ok().flatten()) {
            scroll_into_view_smooth(&target);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stagger_grows_by_a_tenth_of_a_second() {
        assert_eq!(stagger_delay(0), "0s");
        assert_eq!(stagger_delay(1), "0.1s");
        assert_eq!(stagger_delay(3), "0.3s");
        assert_eq!(stagger_delay(12), "1.2s");
    }

    #[test]
    fn only_fragment_links_are_intercepted() {
        assert_eq!(anchor_target("#calculator"), Some("#calculator"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/privacy"), None);
        assert_eq!(anchor_target("https://example.ru/#contacts"), None);
    }

    #[test]
    fn staggered_groups_are_revealed_too() {
        for group in STAGGERED_GROUPS {
            assert!(REVEAL_SELECTOR.contains(group));
        }
    }
}
