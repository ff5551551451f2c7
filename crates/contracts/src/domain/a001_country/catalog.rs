//! Справочник стран для формы выбора страны.
//!
//! Основной источник — restcountries.com (v3.1, затем v2). Если оба
//! запроса не удались, используется встроенный список из 50 стран.
//! Ошибка загрузки пользователю не показывается.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const RESTCOUNTRIES_V3_URL: &str =
    "https://restcountries.com/v3.1/all?fields=name,cca2,currencies,idd,flags";
pub const RESTCOUNTRIES_V2_URL: &str =
    "https://restcountries.com/v2/all?fields=name,alpha2Code,currencies,callingCodes,flag";

/// Страна из внешнего справочника (ещё не сохранённая запись)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryInfo {
    pub name: String,
    pub code: String,
    pub currency_code: String,
    pub currency_sign: String,
    pub phone_code: String,
    pub flag_url: Option<String>,
}

// ---------------------------------------------------------------------------
// restcountries v3.1
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct V3Country {
    name: V3Name,
    cca2: String,
    #[serde(default)]
    currencies: HashMap<String, V3Currency>,
    #[serde(default)]
    idd: V3Idd,
    #[serde(default)]
    flags: V3Flags,
}

#[derive(Debug, Deserialize)]
struct V3Name {
    common: String,
}

#[derive(Debug, Deserialize)]
struct V3Currency {
    #[serde(default)]
    symbol: String,
}

#[derive(Debug, Deserialize, Default)]
struct V3Idd {
    #[serde(default)]
    root: String,
    #[serde(default)]
    suffixes: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct V3Flags {
    #[serde(default)]
    png: Option<String>,
}

/// Разбор ответа restcountries v3.1
pub fn parse_restcountries_v3(body: &str) -> Result<Vec<CountryInfo>, String> {
    let raw: Vec<V3Country> =
        serde_json::from_str(body).map_err(|e| format!("restcountries v3: {}", e))?;
    Ok(raw
        .into_iter()
        .map(|c| {
            // Валют может быть несколько, берём первую по коду
            let mut currencies: Vec<(String, V3Currency)> = c.currencies.into_iter().collect();
            currencies.sort_by(|a, b| a.0.cmp(&b.0));
            let (currency_code, currency_sign) = currencies
                .into_iter()
                .next()
                .map(|(code, cur)| (code, cur.symbol))
                .unwrap_or_default();
            let phone_code = match c.idd.suffixes.as_slice() {
                [single] => format!("{}{}", c.idd.root, single),
                _ => c.idd.root,
            };
            CountryInfo {
                name: c.name.common,
                code: c.cca2,
                currency_code,
                currency_sign,
                phone_code,
                flag_url: c.flags.png,
            }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// restcountries v2
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct V2Country {
    name: String,
    alpha2_code: String,
    #[serde(default)]
    currencies: Vec<V2Currency>,
    #[serde(default)]
    calling_codes: Vec<String>,
    #[serde(default)]
    flag: Option<String>,
}

#[derive(Debug, Deserialize)]
struct V2Currency {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
}

/// Разбор ответа restcountries v2
pub fn parse_restcountries_v2(body: &str) -> Result<Vec<CountryInfo>, String> {
    let raw: Vec<V2Country> =
        serde_json::from_str(body).map_err(|e| format!("restcountries v2: {}", e))?;
    Ok(raw
        .into_iter()
        .map(|c| {
            let currency = c.currencies.into_iter().next();
            CountryInfo {
                name: c.name,
                code: c.alpha2_code,
                currency_code: currency
                    .as_ref()
                    .and_then(|cur| cur.code.clone())
                    .unwrap_or_default(),
                currency_sign: currency.and_then(|cur| cur.symbol).unwrap_or_default(),
                phone_code: c
                    .calling_codes
                    .into_iter()
                    .find(|code| !code.is_empty())
                    .map(|code| format!("+{}", code))
                    .unwrap_or_default(),
                flag_url: c.flag,
            }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Встроенный список
// ---------------------------------------------------------------------------

/// (name, code, currency_code, currency_sign, phone_code)
const FALLBACK_COUNTRIES: [(&str, &str, &str, &str, &str); 50] = [
    ("United States", "US", "USD", "$", "+1"),
    ("Canada", "CA", "CAD", "$", "+1"),
    ("Mexico", "MX", "MXN", "$", "+52"),
    ("Brazil", "BR", "BRL", "R$", "+55"),
    ("Argentina", "AR", "ARS", "$", "+54"),
    ("Chile", "CL", "CLP", "$", "+56"),
    ("Colombia", "CO", "COP", "$", "+57"),
    ("Peru", "PE", "PEN", "S/", "+51"),
    ("United Kingdom", "GB", "GBP", "£", "+44"),
    ("Ireland", "IE", "EUR", "€", "+353"),
    ("France", "FR", "EUR", "€", "+33"),
    ("Germany", "DE", "EUR", "€", "+49"),
    ("Spain", "ES", "EUR", "€", "+34"),
    ("Portugal", "PT", "EUR", "€", "+351"),
    ("Italy", "IT", "EUR", "€", "+39"),
    ("Netherlands", "NL", "EUR", "€", "+31"),
    ("Belgium", "BE", "EUR", "€", "+32"),
    ("Switzerland", "CH", "CHF", "Fr", "+41"),
    ("Austria", "AT", "EUR", "€", "+43"),
    ("Sweden", "SE", "SEK", "kr", "+46"),
    ("Norway", "NO", "NOK", "kr", "+47"),
    ("Denmark", "DK", "DKK", "kr", "+45"),
    ("Finland", "FI", "EUR", "€", "+358"),
    ("Poland", "PL", "PLN", "zł", "+48"),
    ("Greece", "GR", "EUR", "€", "+30"),
    ("Turkey", "TR", "TRY", "₺", "+90"),
    ("Russia", "RU", "RUB", "₽", "+7"),
    ("Ukraine", "UA", "UAH", "₴", "+380"),
    ("Egypt", "EG", "EGP", "£", "+20"),
    ("Morocco", "MA", "MAD", "د.م.", "+212"),
    ("Nigeria", "NG", "NGN", "₦", "+234"),
    ("Kenya", "KE", "KES", "Sh", "+254"),
    ("South Africa", "ZA", "ZAR", "R", "+27"),
    ("Saudi Arabia", "SA", "SAR", "﷼", "+966"),
    ("United Arab Emirates", "AE", "AED", "د.إ", "+971"),
    ("Qatar", "QA", "QAR", "﷼", "+974"),
    ("Israel", "IL", "ILS", "₪", "+972"),
    ("India", "IN", "INR", "₹", "+91"),
    ("Pakistan", "PK", "PKR", "₨", "+92"),
    ("Bangladesh", "BD", "BDT", "৳", "+880"),
    ("China", "CN", "CNY", "¥", "+86"),
    ("Japan", "JP", "JPY", "¥", "+81"),
    ("South Korea", "KR", "KRW", "₩", "+82"),
    ("Indonesia", "ID", "IDR", "Rp", "+62"),
    ("Malaysia", "MY", "MYR", "RM", "+60"),
    ("Singapore", "SG", "SGD", "$", "+65"),
    ("Philippines", "PH", "PHP", "₱", "+63"),
    ("Thailand", "TH", "THB", "฿", "+66"),
    ("Australia", "AU", "AUD", "$", "+61"),
    ("New Zealand", "NZ", "NZD", "$", "+64"),
];

/// Встроенный список стран, отсортированный по имени
pub fn fallback_countries() -> Vec<CountryInfo> {
    let mut list: Vec<CountryInfo> = FALLBACK_COUNTRIES
        .iter()
        .map(|(name, code, currency_code, currency_sign, phone_code)| CountryInfo {
            name: name.to_string(),
            code: code.to_string(),
            currency_code: currency_code.to_string(),
            currency_sign: currency_sign.to_string(),
            phone_code: phone_code.to_string(),
            flag_url: Some(format!(
                "https://flagcdn.com/w80/{}.png",
                code.to_lowercase()
            )),
        })
        .collect();
    sort_by_name(&mut list);
    list
}

pub fn sort_by_name(list: &mut [CountryInfo]) {
    list.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
}

/// Выбрать список стран из последовательных попыток загрузки
///
/// Берётся первая успешная непустая попытка; если таких нет,
/// возвращается встроенный список. Ошибки только логируются вызывающим.
pub fn pick_country_list<I>(attempts: I) -> Vec<CountryInfo>
where
    I: IntoIterator<Item = Result<Vec<CountryInfo>, String>>,
{
    for mut list in attempts.into_iter().flatten() {
        if !list.is_empty() {
            sort_by_name(&mut list);
            return list;
        }
    }
    fallback_countries()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_has_fifty_sorted_entries() {
        let list = fallback_countries();
        assert_eq!(list.len(), 50);
        let names: Vec<String> = list.iter().map(|c| c.name.to_lowercase()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(list[0].name, "Argentina");
    }

    #[test]
    fn test_both_remote_sources_fail_uses_fallback() {
        let list = pick_country_list(vec![
            Err("network error".to_string()),
            Err("timeout".to_string()),
        ]);
        assert_eq!(list, fallback_countries());
    }

    #[test]
    fn test_secondary_used_when_primary_fails() {
        let secondary = vec![CountryInfo {
            name: "Zambia".into(),
            code: "ZM".into(),
            currency_code: "ZMW".into(),
            currency_sign: "ZK".into(),
            phone_code: "+260".into(),
            flag_url: None,
        }];
        let list = pick_country_list(vec![Err("500".to_string()), Ok(secondary.clone())]);
        assert_eq!(list, secondary);
    }

    #[test]
    fn test_empty_primary_falls_through() {
        let list = pick_country_list(vec![Ok(vec![])]);
        assert_eq!(list.len(), 50);
    }

    #[test]
    fn test_parse_v3() {
        let body = r#"[
            {"name": {"common": "Portugal", "official": "Portuguese Republic"},
             "cca2": "PT",
             "currencies": {"EUR": {"name": "Euro", "symbol": "€"}},
             "idd": {"root": "+3", "suffixes": ["51"]},
             "flags": {"png": "https://flagcdn.com/w320/pt.png"}},
            {"name": {"common": "United States"},
             "cca2": "US",
             "currencies": {"USD": {"name": "US dollar", "symbol": "$"}},
             "idd": {"root": "+1", "suffixes": ["201", "202"]},
             "flags": {}}
        ]"#;
        let list = parse_restcountries_v3(body).unwrap();
        assert_eq!(list[0].phone_code, "+351");
        assert_eq!(list[0].currency_code, "EUR");
        assert_eq!(list[1].phone_code, "+1");
        assert_eq!(list[1].flag_url, None);
    }

    #[test]
    fn test_parse_v2() {
        let body = r#"[{"name": "Kenya", "alpha2Code": "KE",
            "currencies": [{"code": "KES", "name": "Kenyan shilling", "symbol": "Sh"}],
            "callingCodes": ["254"], "flag": "https://flagcdn.com/ke.svg"}]"#;
        let list = parse_restcountries_v2(body).unwrap();
        assert_eq!(list[0].code, "KE");
        assert_eq!(list[0].phone_code, "+254");
        assert_eq!(list[0].currency_sign, "Sh");
    }

    #[test]
    fn test_parse_garbage_is_error() {
        assert!(parse_restcountries_v3("<html>").is_err());
    }
}
