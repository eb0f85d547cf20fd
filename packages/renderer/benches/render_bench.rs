use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagecraft_common::{StoreContext, ThemeTokens};
use pagecraft_document::{Breakpoint, ColSpan, PageDocument, Row, Section, WidgetBase};
use pagecraft_registry::initialize;
use pagecraft_renderer::{render_page, to_html, HtmlOptions, RenderOptions};
use serde_json::json;

fn catalog_page(sections: usize) -> PageDocument {
    let sections = (0..sections)
        .map(|s| {
            let mut hero = Row::new(format!("r{}-0", s));
            hero.widgets.push(
                WidgetBase::new(format!("w{}-hero", s), "hero", 1)
                    .with_props(json!({ "title": "Welcome to {{store_name}}", "subtitle": "New arrivals" })),
            );

            let mut cards = Row::new(format!("r{}-1", s));
            for i in 0..3 {
                cards.widgets.push(
                    WidgetBase::new(format!("w{}-{}", s, i), "text", 1)
                        .with_props(json!({ "content": "Tell your customers about Your Store." }))
                        .with_col_span(
                            ColSpan::empty()
                                .with(Breakpoint::Sm, 12)
                                .with(Breakpoint::Md, 6)
                                .with(Breakpoint::Lg, 4),
                        ),
                );
            }
            Section::new(format!("s{}", s)).with_row(hero).with_row(cards)
        })
        .collect();
    PageDocument::new("bench", "Catalog", "/catalog", sections)
}

fn render_small_page(c: &mut Criterion) {
    let registry = initialize().unwrap();
    let page = catalog_page(2);
    let store = StoreContext::new("Acme");
    let theme = ThemeTokens::new();

    c.bench_function("render_small_page", |b| {
        b.iter(|| {
            render_page(
                black_box(&page),
                &registry,
                &theme,
                &store,
                &RenderOptions::storefront(),
            )
        })
    });
}

fn render_large_page(c: &mut Criterion) {
    let registry = initialize().unwrap();
    let page = catalog_page(50);
    let store = StoreContext::new("Acme");
    let theme = ThemeTokens::new();

    c.bench_function("render_large_page_editor", |b| {
        b.iter(|| {
            render_page(
                black_box(&page),
                &registry,
                &theme,
                &store,
                &RenderOptions::editor().with_selected("w10-1"),
            )
        })
    });
}

fn serialize_html(c: &mut Criterion) {
    let registry = initialize().unwrap();
    let page = catalog_page(20);
    let rendered = render_page(
        &page,
        &registry,
        &ThemeTokens::new(),
        &StoreContext::new("Acme"),
        &RenderOptions::storefront(),
    );
    let options = HtmlOptions::default();

    c.bench_function("serialize_html", |b| {
        b.iter(|| to_html(black_box(&rendered), &options))
    });
}

criterion_group!(benches, render_small_page, render_large_page, serialize_html);
criterion_main!(benches);
