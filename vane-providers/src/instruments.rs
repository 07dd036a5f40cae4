use vane_core::{Instrument, Market};

/// The index watchlist served by `/quotes`, with Sina batch codes.
#[must_use]
pub fn default_instruments() -> Vec<Instrument> {
    [
        ("000001.SS", "SSE Composite", "🇨🇳", Market::Domestic, "sh000001"),
        ("399001.SZ", "SZSE Component", "🇨🇳", Market::Domestic, "sz399001"),
        ("399006.SZ", "ChiNext", "🇨🇳", Market::Domestic, "sz399006"),
        ("^HSI", "Hang Seng", "🇭🇰", Market::Regional, "rt_hkHSI"),
        ("^DJI", "Dow Jones", "🇺🇸", Market::International, "int_dji"),
        ("^IXIC", "NASDAQ", "🇺🇸", Market::International, "int_nasdaq"),
        ("^GSPC", "S&P 500", "🇺🇸", Market::International, "int_sp500"),
        ("^N225", "Nikkei 225", "🇯🇵", Market::International, "int_nikkei"),
        ("^FTSE", "FTSE 100", "🇬🇧", Market::International, "int_ftse"),
        ("^GDAXI", "DAX", "🇩🇪", Market::International, "int_dax"),
    ]
    .into_iter()
    .map(|(symbol, name, flag, market, code)| {
        Instrument::new(symbol, name, market, code).with_flag(flag)
    })
    .collect()
}
