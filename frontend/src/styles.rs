pub const CONTAINER: &str = "bg-gray-900 container mx-auto px-6 py-10 max-w-4xl rounded-xl shadow-lg mt-16";
pub const CONTAINER_WIDE: &str = "bg-gray-900 container mx-auto px-6 py-10 max-w-7xl rounded-xl shadow-lg mt-16";

pub const ALERT_CARD: &str = "p-4 rounded-lg shadow-md mb-6";

pub const INPUT_BASE: &str = "appearance-none border border-gray-600 bg-gray-800 text-white text-lg rounded-md w-full py-2 px-4 focus:outline-none focus:border-blue-500";
pub const INPUT_GROUP: &str = "flex-1 flex flex-col gap-2";

pub const BUTTON_BASE: &str = "px-5 py-2 rounded-lg font-medium text-white transition-all duration-150 disabled:opacity-50 disabled:cursor-not-allowed";
pub const BUTTON_PRIMARY: &str = "bg-blue-600 hover:bg-blue-700 focus:ring-2 focus:ring-blue-400 focus:outline-none";
pub const BUTTON_SUCCESS: &str = "bg-green-600 hover:bg-green-700 focus:ring-2 focus:ring-green-400 focus:outline-none";
pub const BUTTON_FULL: &str = "w-full py-3 px-5 font-semibold rounded-lg transition-all duration-150 disabled:opacity-50 disabled:cursor-not-allowed mt-8";

pub const TEXT_LABEL: &str = "block text-sm font-semibold text-gray-200";
pub const TEXT_LABEL_SM: &str = "block text-xs font-medium text-gray-400 mb-2";
pub const TEXT_MUTED: &str = "text-sm text-gray-400";
pub const HEADING_LG: &str = "text-3xl font-extrabold mb-4 text-center text-gray-100";
pub const HEADING_SM: &str = "text-xl font-semibold mb-3 text-gray-100";

pub const FLEX_BETWEEN: &str = "flex justify-between items-center";
pub const SPACE_Y_BASE: &str = "space-y-3";
pub const SPACE_Y_LG: &str = "space-y-6";

pub const CHECKBOX_GROUP: &str = "max-h-44 overflow-y-auto border border-gray-600 bg-gray-800 rounded-md p-3 space-y-1";
pub const CHECKBOX_LABEL: &str = "flex items-center gap-2 text-sm text-gray-200 cursor-pointer";

pub const TABLE_WRAP: &str = "overflow-x-auto border border-gray-700 rounded-lg mt-6";
pub const TABLE: &str = "min-w-full divide-y divide-gray-700 text-left";
pub const TABLE_HEADER: &str = "px-4 py-3 text-xs font-semibold uppercase tracking-wider text-gray-400 bg-gray-800";
pub const TABLE_CELL: &str = "px-4 py-2 text-sm text-gray-200 whitespace-nowrap";

pub fn combine_classes(base: &str, additional: &str) -> String {
    format!("{} {}", base, additional)
}

pub fn button_primary(full_width: bool) -> String {
    if full_width {
        combine_classes(BUTTON_BASE, &combine_classes(BUTTON_PRIMARY, BUTTON_FULL))
    } else {
        combine_classes(BUTTON_BASE, BUTTON_PRIMARY)
    }
}

pub fn alert_style(style: &str) -> String {
    match style {
        "error" => combine_classes(ALERT_CARD, "bg-red-500 text-white shadow-lg"),
        "success" => combine_classes(ALERT_CARD, "bg-green-500 text-white shadow-lg"),
        "warning" => combine_classes(ALERT_CARD, "bg-yellow-500 text-white shadow-lg"),
        _ => combine_classes(ALERT_CARD, "bg-blue-500 text-white shadow-lg"),
    }
}
