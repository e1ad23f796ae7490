use maud::{html, Markup};

use crate::templates::layouts::{base, PageConfig};

pub fn home_page(model_ready: bool) -> Markup {
    let config = PageConfig {
        title: "Temperature Forecaster",
    };

    base(&config, content(model_ready))
}

fn content(model_ready: bool) -> Markup {
    html! {
        @if !model_ready {
            div class="notification is-warning" {
                "Model artifacts failed to load; predictions will return an error."
            }
        }

        div class="columns" {
            div class="column is-two-thirds" {
                form id="predictForm" {
                    (field("date_time", "Date & time", "datetime-local", None))
                    div class="columns is-multiline" {
                        div class="column is-half" { (field("DewPointC", "Dew point (°C)", "number", Some("0.1"))) }
                        div class="column is-half" { (field("humidity", "Humidity (%)", "number", Some("1"))) }
                        div class="column is-half" { (field("cloudcover", "Cloud cover (%)", "number", Some("1"))) }
                        div class="column is-half" { (field("uvIndex", "UV index", "number", Some("1"))) }
                        div class="column is-half" { (field("sunHour", "Sun hours", "number", Some("0.1"))) }
                        div class="column is-half" { (field("precipMM", "Precipitation (mm)", "number", Some("0.1"))) }
                        div class="column is-half" { (field("pressure", "Pressure (mb)", "number", Some("1"))) }
                        div class="column is-half" { (field("windspeedKmph", "Wind speed (km/h)", "number", Some("1"))) }
                        div class="column is-half" { (field("sunrise", "Sunrise", "time", None)) }
                        div class="column is-half" { (field("sunset", "Sunset", "time", None)) }
                    }
                    div class="control" {
                        button id="submitBtn" type="submit" class="button is-primary" {
                            "Predict Temperature"
                        }
                    }
                }
            }

            div class="column" {
                div class="box has-text-centered" {
                    p class="heading" { "Predicted temperature" }
                    p class="title" {
                        span id="resultValue" { "--" }
                        " °C"
                    }
                }
                div id="error-msg" class="notification is-danger is-hidden" {}
                table class="table is-fullwidth is-narrow" {
                    thead { tr { th { "Time" } th { "°C" } } }
                    tbody id="history" {}
                }
            }
        }
    }
}

fn field(id: &str, label: &str, input_type: &str, step: Option<&str>) -> Markup {
    html! {
        div class="field" {
            label class="label" for=(id) { (label) }
            div class="control" {
                input class="input" id=(id) name=(id) type=(input_type) step=[step] required;
            }
        }
    }
}
