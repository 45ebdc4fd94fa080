//! ISO 639 语言代码转换
//!
//! hOCR 文档里的 `lang` 属性使用 ISO 639-3 三字母代码（Tesseract 的语言名），
//! 翻译服务只接受 ISO 639-1 两字母代码。
//!
//! Reference: <https://iso639-3.sil.org/code_tables/639/data>

use crate::translation::error::{TranslationError, TranslationResult};

/// 将 ISO 639-3 代码转换为 ISO 639-1 代码
///
/// 同时接受 ISO 639-2/B 文献代码（`ger`、`fre`、`chi` 等）以及带书写系统后缀的
/// Tesseract 语言名（`chi_sim`、`aze_cyrl`）。
///
/// # Examples
/// ```
/// use hocr_translate::translation::languages::iso639_3_to_iso639_1;
///
/// assert_eq!(iso639_3_to_iso639_1("eng").unwrap(), "en");
/// assert_eq!(iso639_3_to_iso639_1("chi_sim").unwrap(), "zh");
/// assert!(iso639_3_to_iso639_1("xyz").is_err());
/// ```
pub fn iso639_3_to_iso639_1(code: &str) -> TranslationResult<&'static str> {
    let normalized = code.trim().to_lowercase();
    let base = normalized.split('_').next().unwrap_or_default();

    terminology_code(base)
        .or_else(|| bibliographic_code(base))
        .ok_or_else(|| TranslationError::LanguageNotFound(code.to_string()))
}

/// `lang` 属性可能缺失，缺失时同样视为无法映射
pub fn map_optional(code: Option<&str>) -> TranslationResult<&'static str> {
    match code {
        Some(code) => iso639_3_to_iso639_1(code),
        None => Err(TranslationError::LanguageNotFound("None".to_string())),
    }
}

fn terminology_code(code: &str) -> Option<&'static str> {
    let iso639_1 = match code {
        "aar" => "aa",
        "abk" => "ab",
        "afr" => "af",
        "aka" => "ak",
        "amh" => "am",
        "ara" => "ar",
        "arg" => "an",
        "asm" => "as",
        "ava" => "av",
        "ave" => "ae",
        "aym" => "ay",
        "aze" => "az",
        "bak" => "ba",
        "bam" => "bm",
        "bel" => "be",
        "ben" => "bn",
        "bis" => "bi",
        "bod" => "bo",
        "bos" => "bs",
        "bre" => "br",
        "bul" => "bg",
        "cat" => "ca",
        "ces" => "cs",
        "cha" => "ch",
        "che" => "ce",
        "chu" => "cu",
        "chv" => "cv",
        "cor" => "kw",
        "cos" => "co",
        "cre" => "cr",
        "cym" => "cy",
        "dan" => "da",
        "deu" => "de",
        "div" => "dv",
        "dzo" => "dz",
        "ell" => "el",
        "eng" => "en",
        "epo" => "eo",
        "est" => "et",
        "eus" => "eu",
        "ewe" => "ee",
        "fao" => "fo",
        "fas" => "fa",
        "fij" => "fj",
        "fin" => "fi",
        "fra" => "fr",
        "fry" => "fy",
        "ful" => "ff",
        "gla" => "gd",
        "gle" => "ga",
        "glg" => "gl",
        "glv" => "gv",
        "grn" => "gn",
        "guj" => "gu",
        "hat" => "ht",
        "hau" => "ha",
        "hbs" => "sh",
        "heb" => "he",
        "her" => "hz",
        "hin" => "hi",
        "hmo" => "ho",
        "hrv" => "hr",
        "hun" => "hu",
        "hye" => "hy",
        "ibo" => "ig",
        "ido" => "io",
        "iii" => "ii",
        "iku" => "iu",
        "ile" => "ie",
        "ina" => "ia",
        "ind" => "id",
        "ipk" => "ik",
        "isl" => "is",
        "ita" => "it",
        "jav" => "jv",
        "jpn" => "ja",
        "kal" => "kl",
        "kan" => "kn",
        "kas" => "ks",
        "kat" => "ka",
        "kau" => "kr",
        "kaz" => "kk",
        "khm" => "km",
        "kik" => "ki",
        "kin" => "rw",
        "kir" => "ky",
        "kom" => "kv",
        "kon" => "kg",
        "kor" => "ko",
        "kua" => "kj",
        "kur" => "ku",
        "lao" => "lo",
        "lat" => "la",
        "lav" => "lv",
        "lim" => "li",
        "lin" => "ln",
        "lit" => "lt",
        "ltz" => "lb",
        "lub" => "lu",
        "lug" => "lg",
        "mah" => "mh",
        "mal" => "ml",
        "mar" => "mr",
        "mkd" => "mk",
        "mlg" => "mg",
        "mlt" => "mt",
        "mon" => "mn",
        "mri" => "mi",
        "msa" => "ms",
        "mya" => "my",
        "nau" => "na",
        "nav" => "nv",
        "nbl" => "nr",
        "nde" => "nd",
        "ndo" => "ng",
        "nep" => "ne",
        "nld" => "nl",
        "nno" => "nn",
        "nob" => "nb",
        "nor" => "no",
        "nya" => "ny",
        "oci" => "oc",
        "oji" => "oj",
        "ori" => "or",
        "orm" => "om",
        "oss" => "os",
        "pan" => "pa",
        "pli" => "pi",
        "pol" => "pl",
        "por" => "pt",
        "pus" => "ps",
        "que" => "qu",
        "roh" => "rm",
        "ron" => "ro",
        "run" => "rn",
        "rus" => "ru",
        "sag" => "sg",
        "san" => "sa",
        "sin" => "si",
        "slk" => "sk",
        "slv" => "sl",
        "sme" => "se",
        "smo" => "sm",
        "sna" => "sn",
        "snd" => "sd",
        "som" => "so",
        "sot" => "st",
        "spa" => "es",
        "sqi" => "sq",
        "srd" => "sc",
        "srp" => "sr",
        "ssw" => "ss",
        "sun" => "su",
        "swa" => "sw",
        "swe" => "sv",
        "tah" => "ty",
        "tam" => "ta",
        "tat" => "tt",
        "tel" => "te",
        "tgk" => "tg",
        "tgl" => "tl",
        "tha" => "th",
        "tir" => "ti",
        "ton" => "to",
        "tsn" => "tn",
        "tso" => "ts",
        "tuk" => "tk",
        "tur" => "tr",
        "twi" => "tw",
        "uig" => "ug",
        "ukr" => "uk",
        "urd" => "ur",
        "uzb" => "uz",
        "ven" => "ve",
        "vie" => "vi",
        "vol" => "vo",
        "wln" => "wa",
        "wol" => "wo",
        "xho" => "xh",
        "yid" => "yi",
        "yor" => "yo",
        "zha" => "za",
        "zho" => "zh",
        "zul" => "zu",
        _ => return None,
    };
    Some(iso639_1)
}

fn bibliographic_code(code: &str) -> Option<&'static str> {
    let iso639_1 = match code {
        "alb" => "sq",
        "arm" => "hy",
        "baq" => "eu",
        "bur" => "my",
        "chi" => "zh",
        "cze" => "cs",
        "dut" => "nl",
        "fre" => "fr",
        "geo" => "ka",
        "ger" => "de",
        "gre" => "el",
        "ice" => "is",
        "mac" => "mk",
        "mao" => "mi",
        "may" => "ms",
        "per" => "fa",
        "rum" => "ro",
        "slo" => "sk",
        "tib" => "bo",
        "wel" => "cy",
        _ => return None,
    };
    Some(iso639_1)
}
