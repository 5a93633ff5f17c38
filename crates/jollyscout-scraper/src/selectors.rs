//! CSS selectors for the search form and the rendered results list.
//!
//! One site shape, pinned here in one place. No guarantee is made against
//! site layout changes; when the site ships a redesign, this is the file
//! that breaks.

/// Destination text input on the landing page.
pub const DESTINATION_INPUT: &str = "input[name=destination]";

/// Row that opens the date-picker widget.
pub const DATE_ROW: &str = "div.date-row";

/// Date-picker header; present once the widget has rendered.
pub const DATEPICKER_TITLE: &str = "div.ui-datepicker-title";
pub const DATEPICKER_MONTH: &str = ".ui-datepicker-title .ui-datepicker-month";
pub const DATEPICKER_YEAR: &str = ".ui-datepicker-title .ui-datepicker-year";

/// "Next month" arrow in the date-picker.
pub const DATEPICKER_NEXT: &str = "span.ui-icon-circle-triangle-e";

/// Clickable day cells of the visible month; matched by their text.
pub const DAY_CELLS: &str = "table.ui-datepicker-calendar tbody a";

/// Room/person count dropdown trigger.
pub const PERSON_COUNT: &str = "div.list.person-count";

/// Current adult count inside the expanded dropdown.
pub const ADULT_VALUE: &str = ".room-count-dropdown.show .room-info .adult-number";
pub const ADULT_INCREMENT: &str = ".room-count-dropdown.show .room-info div[data-name=inc]";
pub const ADULT_DECREMENT: &str = ".room-count-dropdown.show .room-info div[data-name=dec]";

/// Search action button on the travel planner form.
pub const SEARCH_BUTTON: &str = ".travel-planner-inner .action-button";

/// Container the result cards render into; its presence signals that the
/// results page has loaded.
pub const RESULTS_CONTAINER: &str = "div.search-list";

/// Status line under the list ("you have viewed N of M" / all-displayed).
pub const LOAD_MORE_STATUS: &str = ".listMoreCt .moreTextList";
pub const LOAD_MORE_BUTTON: &str = ".listMoreCt a button";

/// Lowercased fragment of the status text once every listing is rendered.
pub const ALL_DISPLAYED_MARKER: &str = "tamamını görüntülediniz";

/// One listing card in the results list.
pub const LISTING_CARD: &str = "div.list[data-url]";

/// Marker for sold-out/unavailable cards; such cards are skipped.
pub const LISTING_UNAVAILABLE: &str = ".alert.alert-danger";

/// Fields within one listing card.
pub const LISTING_NAME: &str = ".hotel-name";
pub const LISTING_PRICE: &str = ".total-price .current-price";
pub const LISTING_CANCEL_POLICY: &str = ".cancelPolicy-badge";
pub const LISTING_RECOMMENDED: &str = ".detailrecommend";
pub const LISTING_FEATURES: &str = "ul.detail-list li";
pub const LISTING_BOARD_TYPE: &str = ".meal-type-info .info";
pub const LISTING_LOCATION: &str = ".location";
