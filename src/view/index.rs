use maud::{Markup, html};

use crate::HTMX_PATH;
use crate::model::Itinerary;

#[must_use]
pub fn render_index_template(itinerary: &Itinerary) -> Markup {
    let home = itinerary.default_camera;
    html! {
        (maud::DOCTYPE)
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            title { (itinerary.title) }
            script src=(HTMX_PATH) defer {}
        }
        body {
            div class="app-layout" {
                div id="sidebar" hx-get="sidebar" hx-trigger="load" hx-swap="outerHTML" {
                    "Loading..."
                }
                div id="map" class="map-container"
                    data-center-lat=(home.center.lat)
                    data-center-lng=(home.center.lng)
                    data-zoom=(home.zoom) {}
            }
        }
    }
}
