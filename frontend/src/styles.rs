pub const PAGE_CARD: &str = "bg-gray-800 rounded-xl shadow-xl shadow-[0_6px_20px_-6px_rgba(255,255,255,0.04)] p-8 w-full text-center backdrop-blur-lg bg-gray-900/80 border border-gray-700/50";
pub const BUTTON_PRIMARY: &str = "inline-flex items-center justify-center px-4 py-2 rounded-lg font-medium text-white bg-gradient-to-r from-blue-600 to-blue-700 hover:from-blue-700 hover:to-blue-800 shadow-lg disabled:opacity-50 disabled:cursor-not-allowed transition-all duration-300";
pub const BUTTON_DANGER: &str = "inline-flex items-center justify-center rounded-lg bg-red-600 px-4 py-2 font-medium text-white hover:bg-red-700";
pub const BUTTON_RESET: &str = "fixed bottom-4 right-4 px-3 py-1 text-xs rounded border border-gray-600 text-gray-400 hover:text-white hover:border-gray-400";
pub const TEXT_H1: &str = "text-3xl font-bold text-white";
pub const TEXT_H2: &str = "text-2xl font-bold text-white";
pub const TEXT_H3: &str = "text-xl font-bold text-white";
pub const TEXT_BODY: &str = "text-gray-300";
pub const TEXT_SMALL: &str = "text-sm text-gray-400";
pub const TEXT_ERROR: &str = "text-sm text-red-400";
pub const ALERT_SUCCESS: &str = "bg-green-900/50 border border-green-800 rounded-lg p-4 text-green-200";
pub const ALERT_ERROR: &str = "bg-red-900/50 border border-red-800 rounded-lg p-4 text-red-200";
pub const ALERT_WARNING: &str = "p-4 text-sm text-yellow-400 rounded-lg bg-gray-900 border border-yellow-800";
pub const LOADING_SPINNER: &str = "animate-spin h-5 w-5 text-blue-400";
pub const BANNER_MAINTENANCE: &str = "w-full max-w-md mb-4 p-3 text-sm text-center text-yellow-300 rounded-lg bg-yellow-900/40 border border-yellow-700";

// Wheel
pub const BUTTON_SPIN: &str = "w-full px-8 py-4 rounded-full font-bold text-lg text-white bg-gradient-to-r from-yellow-400 to-orange-500 hover:from-yellow-500 hover:to-orange-600 shadow-lg hover:shadow-xl transform hover:-translate-y-0.5 transition-all duration-300";
pub const BUTTON_SPIN_DISABLED: &str = "w-full px-8 py-4 rounded-full font-bold text-lg text-white bg-gradient-to-r from-gray-400 to-gray-500 opacity-75 cursor-not-allowed";
pub const VERDICT_QUIZ: &str = "mb-4 text-xl font-semibold text-violet-300";
pub const VERDICT_PAYMENT: &str = "mb-4 text-xl font-semibold text-orange-300";

// Quiz
pub const OPTION: &str = "w-full text-left px-4 py-3 rounded-lg border border-gray-600 text-white hover:bg-gray-700 disabled:opacity-60 transition-colors duration-200";
pub const OPTION_SELECTED: &str = "w-full text-left px-4 py-3 rounded-lg border-2 border-blue-500 bg-blue-900/40 text-white disabled:opacity-60";
pub const MODAL_OVERLAY: &str = "fixed inset-0 z-50 flex items-center justify-center bg-black/60 px-4";
pub const MODAL_CARD: &str = "w-full max-w-sm rounded-xl bg-gray-900 border border-gray-700 p-6 text-left";

// Payment
pub const AMOUNT: &str = "my-6 text-5xl font-bold text-transparent bg-clip-text bg-gradient-to-r from-yellow-400 to-orange-500";
