//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use evolution_core::{Locale, ProductSummary};
use tracing::instrument;

use crate::state::AppState;

// =============================================================================
// Hero and Timeline (static content)
// =============================================================================

/// Hero banner copy.
#[derive(Clone)]
pub struct Hero {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub note: &'static str,
}

const HERO: Hero = Hero {
    title: "Welcome to E-commerce Evolution",
    subtitle: "This is the base project that will evolve into a full-featured e-commerce platform",
    note: "🚀 Day 2: We'll connect these products with the real API",
};

/// One step of the project evolution timeline.
#[derive(Clone)]
pub struct Milestone {
    pub label: &'static str,
    /// The milestone currently in progress.
    pub current: bool,
}

const MILESTONES: [Milestone; 4] = [
    Milestone {
        label: "Day 1: Clean Architecture (Backend)",
        current: true,
    },
    Milestone {
        label: "Day 2: Products Feature (Frontend)",
        current: false,
    },
    Milestone {
        label: "Day 3: Orders & Cart",
        current: false,
    },
    Milestone {
        label: "Day 4: Authentication",
        current: false,
    },
];

// =============================================================================
// Product and Image Views
// =============================================================================

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    /// Price formatted for the page locale.
    pub price: String,
    pub image: Option<ImageView>,
}

/// Image display data for templates.
#[derive(Clone)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

impl ProductCardView {
    /// Build a card from a product projection, formatting the price for `locale`.
    #[must_use]
    pub fn new(summary: &ProductSummary, locale: Locale) -> Self {
        Self {
            id: summary.id.to_string(),
            name: summary.name.clone(),
            category: summary.category.clone(),
            description: summary.description.clone(),
            price: summary.price.format(locale),
            image: summary.image_url.as_ref().map(|url| ImageView {
                url: url.clone(),
                alt: if summary.image_alt.is_empty() {
                    summary.name.clone()
                } else {
                    summary.image_alt.clone()
                },
            }),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Value of the document `lang` attribute.
    pub lang: &'static str,
    pub hero: Hero,
    /// Featured product cards, in catalog order.
    pub products: Vec<ProductCardView>,
    /// Project evolution timeline.
    pub milestones: Vec<Milestone>,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let locale = state.config().locale;
    let products: Vec<ProductCardView> = state
        .catalog()
        .list_products()
        .iter()
        .filter(|product| product.is_active)
        .map(|product| ProductCardView::new(&ProductSummary::from(product), locale))
        .collect();

    tracing::debug!(count = products.len(), "Rendering featured products");

    HomeTemplate {
        lang: locale.language(),
        hero: HERO,
        products,
        milestones: MILESTONES.to_vec(),
    }
}
