//! Named character reference table.
//!
//! Covers the HTML 4 entity set plus `&apos;`. Names that HTML also accepts
//! without a trailing semicolon (`&amp`, `&copy`, `&eacute` ...) appear twice,
//! once with and once without the `;`.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Maps entity names (without the leading `&`) to their replacement text.
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("Aacute;", "\u{00C1}"),
        ("Aacute", "\u{00C1}"),
        ("aacute;", "\u{00E1}"),
        ("aacute", "\u{00E1}"),
        ("Acirc;", "\u{00C2}"),
        ("Acirc", "\u{00C2}"),
        ("acirc;", "\u{00E2}"),
        ("acirc", "\u{00E2}"),
        ("acute;", "\u{00B4}"),
        ("acute", "\u{00B4}"),
        ("AElig;", "\u{00C6}"),
        ("AElig", "\u{00C6}"),
        ("aelig;", "\u{00E6}"),
        ("aelig", "\u{00E6}"),
        ("Agrave;", "\u{00C0}"),
        ("Agrave", "\u{00C0}"),
        ("agrave;", "\u{00E0}"),
        ("agrave", "\u{00E0}"),
        ("alefsym;", "\u{2135}"),
        ("Alpha;", "\u{0391}"),
        ("alpha;", "\u{03B1}"),
        ("amp;", "&"),
        ("amp", "&"),
        ("and;", "\u{2227}"),
        ("ang;", "\u{2220}"),
        ("apos;", "'"),
        ("Aring;", "\u{00C5}"),
        ("Aring", "\u{00C5}"),
        ("aring;", "\u{00E5}"),
        ("aring", "\u{00E5}"),
        ("asymp;", "\u{2248}"),
        ("Atilde;", "\u{00C3}"),
        ("Atilde", "\u{00C3}"),
        ("atilde;", "\u{00E3}"),
        ("atilde", "\u{00E3}"),
        ("Auml;", "\u{00C4}"),
        ("Auml", "\u{00C4}"),
        ("auml;", "\u{00E4}"),
        ("auml", "\u{00E4}"),
        ("bdquo;", "\u{201E}"),
        ("Beta;", "\u{0392}"),
        ("beta;", "\u{03B2}"),
        ("brvbar;", "\u{00A6}"),
        ("brvbar", "\u{00A6}"),
        ("bull;", "\u{2022}"),
        ("cap;", "\u{2229}"),
        ("Ccedil;", "\u{00C7}"),
        ("Ccedil", "\u{00C7}"),
        ("ccedil;", "\u{00E7}"),
        ("ccedil", "\u{00E7}"),
        ("cedil;", "\u{00B8}"),
        ("cedil", "\u{00B8}"),
        ("cent;", "\u{00A2}"),
        ("cent", "\u{00A2}"),
        ("Chi;", "\u{03A7}"),
        ("chi;", "\u{03C7}"),
        ("circ;", "\u{02C6}"),
        ("clubs;", "\u{2663}"),
        ("cong;", "\u{2245}"),
        ("copy;", "\u{00A9}"),
        ("copy", "\u{00A9}"),
        ("crarr;", "\u{21B5}"),
        ("cup;", "\u{222A}"),
        ("curren;", "\u{00A4}"),
        ("curren", "\u{00A4}"),
        ("Dagger;", "\u{2021}"),
        ("dagger;", "\u{2020}"),
        ("dArr;", "\u{21D3}"),
        ("darr;", "\u{2193}"),
        ("deg;", "\u{00B0}"),
        ("deg", "\u{00B0}"),
        ("Delta;", "\u{0394}"),
        ("delta;", "\u{03B4}"),
        ("diams;", "\u{2666}"),
        ("divide;", "\u{00F7}"),
        ("divide", "\u{00F7}"),
        ("Eacute;", "\u{00C9}"),
        ("Eacute", "\u{00C9}"),
        ("eacute;", "\u{00E9}"),
        ("eacute", "\u{00E9}"),
        ("Ecirc;", "\u{00CA}"),
        ("Ecirc", "\u{00CA}"),
        ("ecirc;", "\u{00EA}"),
        ("ecirc", "\u{00EA}"),
        ("Egrave;", "\u{00C8}"),
        ("Egrave", "\u{00C8}"),
        ("egrave;", "\u{00E8}"),
        ("egrave", "\u{00E8}"),
        ("empty;", "\u{2205}"),
        ("emsp;", "\u{2003}"),
        ("ensp;", "\u{2002}"),
        ("Epsilon;", "\u{0395}"),
        ("epsilon;", "\u{03B5}"),
        ("equiv;", "\u{2261}"),
        ("Eta;", "\u{0397}"),
        ("eta;", "\u{03B7}"),
        ("ETH;", "\u{00D0}"),
        ("ETH", "\u{00D0}"),
        ("eth;", "\u{00F0}"),
        ("eth", "\u{00F0}"),
        ("Euml;", "\u{00CB}"),
        ("Euml", "\u{00CB}"),
        ("euml;", "\u{00EB}"),
        ("euml", "\u{00EB}"),
        ("euro;", "\u{20AC}"),
        ("exist;", "\u{2203}"),
        ("fnof;", "\u{0192}"),
        ("forall;", "\u{2200}"),
        ("frac12;", "\u{00BD}"),
        ("frac12", "\u{00BD}"),
        ("frac14;", "\u{00BC}"),
        ("frac14", "\u{00BC}"),
        ("frac34;", "\u{00BE}"),
        ("frac34", "\u{00BE}"),
        ("frasl;", "\u{2044}"),
        ("Gamma;", "\u{0393}"),
        ("gamma;", "\u{03B3}"),
        ("ge;", "\u{2265}"),
        ("gt;", ">"),
        ("gt", ">"),
        ("hArr;", "\u{21D4}"),
        ("harr;", "\u{2194}"),
        ("hearts;", "\u{2665}"),
        ("hellip;", "\u{2026}"),
        ("Iacute;", "\u{00CD}"),
        ("Iacute", "\u{00CD}"),
        ("iacute;", "\u{00ED}"),
        ("iacute", "\u{00ED}"),
        ("Icirc;", "\u{00CE}"),
        ("Icirc", "\u{00CE}"),
        ("icirc;", "\u{00EE}"),
        ("icirc", "\u{00EE}"),
        ("iexcl;", "\u{00A1}"),
        ("iexcl", "\u{00A1}"),
        ("Igrave;", "\u{00CC}"),
        ("Igrave", "\u{00CC}"),
        ("igrave;", "\u{00EC}"),
        ("igrave", "\u{00EC}"),
        ("image;", "\u{2111}"),
        ("infin;", "\u{221E}"),
        ("int;", "\u{222B}"),
        ("Iota;", "\u{0399}"),
        ("iota;", "\u{03B9}"),
        ("iquest;", "\u{00BF}"),
        ("iquest", "\u{00BF}"),
        ("isin;", "\u{2208}"),
        ("Iuml;", "\u{00CF}"),
        ("Iuml", "\u{00CF}"),
        ("iuml;", "\u{00EF}"),
        ("iuml", "\u{00EF}"),
        ("Kappa;", "\u{039A}"),
        ("kappa;", "\u{03BA}"),
        ("Lambda;", "\u{039B}"),
        ("lambda;", "\u{03BB}"),
        ("lang;", "\u{27E8}"),
        ("laquo;", "\u{00AB}"),
        ("laquo", "\u{00AB}"),
        ("lArr;", "\u{21D0}"),
        ("larr;", "\u{2190}"),
        ("lceil;", "\u{2308}"),
        ("ldquo;", "\u{201C}"),
        ("le;", "\u{2264}"),
        ("lfloor;", "\u{230A}"),
        ("lowast;", "\u{2217}"),
        ("loz;", "\u{25CA}"),
        ("lrm;", "\u{200E}"),
        ("lsaquo;", "\u{2039}"),
        ("lsquo;", "\u{2018}"),
        ("lt;", "<"),
        ("lt", "<"),
        ("macr;", "\u{00AF}"),
        ("macr", "\u{00AF}"),
        ("mdash;", "\u{2014}"),
        ("micro;", "\u{00B5}"),
        ("micro", "\u{00B5}"),
        ("middot;", "\u{00B7}"),
        ("middot", "\u{00B7}"),
        ("minus;", "\u{2212}"),
        ("Mu;", "\u{039C}"),
        ("mu;", "\u{03BC}"),
        ("nabla;", "\u{2207}"),
        ("nbsp;", "\u{00A0}"),
        ("nbsp", "\u{00A0}"),
        ("ndash;", "\u{2013}"),
        ("ne;", "\u{2260}"),
        ("ni;", "\u{220B}"),
        ("not;", "\u{00AC}"),
        ("not", "\u{00AC}"),
        ("notin;", "\u{2209}"),
        ("nsub;", "\u{2284}"),
        ("Ntilde;", "\u{00D1}"),
        ("Ntilde", "\u{00D1}"),
        ("ntilde;", "\u{00F1}"),
        ("ntilde", "\u{00F1}"),
        ("Nu;", "\u{039D}"),
        ("nu;", "\u{03BD}"),
        ("Oacute;", "\u{00D3}"),
        ("Oacute", "\u{00D3}"),
        ("oacute;", "\u{00F3}"),
        ("oacute", "\u{00F3}"),
        ("Ocirc;", "\u{00D4}"),
        ("Ocirc", "\u{00D4}"),
        ("ocirc;", "\u{00F4}"),
        ("ocirc", "\u{00F4}"),
        ("OElig;", "\u{0152}"),
        ("oelig;", "\u{0153}"),
        ("Ograve;", "\u{00D2}"),
        ("Ograve", "\u{00D2}"),
        ("ograve;", "\u{00F2}"),
        ("ograve", "\u{00F2}"),
        ("oline;", "\u{203E}"),
        ("Omega;", "\u{03A9}"),
        ("omega;", "\u{03C9}"),
        ("Omicron;", "\u{039F}"),
        ("omicron;", "\u{03BF}"),
        ("oplus;", "\u{2295}"),
        ("or;", "\u{2228}"),
        ("ordf;", "\u{00AA}"),
        ("ordf", "\u{00AA}"),
        ("ordm;", "\u{00BA}"),
        ("ordm", "\u{00BA}"),
        ("Oslash;", "\u{00D8}"),
        ("Oslash", "\u{00D8}"),
        ("oslash;", "\u{00F8}"),
        ("oslash", "\u{00F8}"),
        ("Otilde;", "\u{00D5}"),
        ("Otilde", "\u{00D5}"),
        ("otilde;", "\u{00F5}"),
        ("otilde", "\u{00F5}"),
        ("otimes;", "\u{2297}"),
        ("Ouml;", "\u{00D6}"),
        ("Ouml", "\u{00D6}"),
        ("ouml;", "\u{00F6}"),
        ("ouml", "\u{00F6}"),
        ("para;", "\u{00B6}"),
        ("para", "\u{00B6}"),
        ("part;", "\u{2202}"),
        ("permil;", "\u{2030}"),
        ("perp;", "\u{22A5}"),
        ("Phi;", "\u{03A6}"),
        ("phi;", "\u{03C6}"),
        ("Pi;", "\u{03A0}"),
        ("pi;", "\u{03C0}"),
        ("piv;", "\u{03D6}"),
        ("plusmn;", "\u{00B1}"),
        ("plusmn", "\u{00B1}"),
        ("pound;", "\u{00A3}"),
        ("pound", "\u{00A3}"),
        ("Prime;", "\u{2033}"),
        ("prime;", "\u{2032}"),
        ("prod;", "\u{220F}"),
        ("prop;", "\u{221D}"),
        ("Psi;", "\u{03A8}"),
        ("psi;", "\u{03C8}"),
        ("quot;", "\""),
        ("quot", "\""),
        ("radic;", "\u{221A}"),
        ("rang;", "\u{27E9}"),
        ("raquo;", "\u{00BB}"),
        ("raquo", "\u{00BB}"),
        ("rArr;", "\u{21D2}"),
        ("rarr;", "\u{2192}"),
        ("rceil;", "\u{2309}"),
        ("rdquo;", "\u{201D}"),
        ("real;", "\u{211C}"),
        ("reg;", "\u{00AE}"),
        ("reg", "\u{00AE}"),
        ("rfloor;", "\u{230B}"),
        ("Rho;", "\u{03A1}"),
        ("rho;", "\u{03C1}"),
        ("rlm;", "\u{200F}"),
        ("rsaquo;", "\u{203A}"),
        ("rsquo;", "\u{2019}"),
        ("sbquo;", "\u{201A}"),
        ("Scaron;", "\u{0160}"),
        ("scaron;", "\u{0161}"),
        ("sdot;", "\u{22C5}"),
        ("sect;", "\u{00A7}"),
        ("sect", "\u{00A7}"),
        ("shy;", "\u{00AD}"),
        ("shy", "\u{00AD}"),
        ("Sigma;", "\u{03A3}"),
        ("sigma;", "\u{03C3}"),
        ("sigmaf;", "\u{03C2}"),
        ("sim;", "\u{223C}"),
        ("spades;", "\u{2660}"),
        ("sub;", "\u{2282}"),
        ("sube;", "\u{2286}"),
        ("sum;", "\u{2211}"),
        ("sup;", "\u{2283}"),
        ("sup1;", "\u{00B9}"),
        ("sup1", "\u{00B9}"),
        ("sup2;", "\u{00B2}"),
        ("sup2", "\u{00B2}"),
        ("sup3;", "\u{00B3}"),
        ("sup3", "\u{00B3}"),
        ("supe;", "\u{2287}"),
        ("szlig;", "\u{00DF}"),
        ("szlig", "\u{00DF}"),
        ("Tau;", "\u{03A4}"),
        ("tau;", "\u{03C4}"),
        ("there4;", "\u{2234}"),
        ("Theta;", "\u{0398}"),
        ("theta;", "\u{03B8}"),
        ("thetasym;", "\u{03D1}"),
        ("thinsp;", "\u{2009}"),
        ("THORN;", "\u{00DE}"),
        ("THORN", "\u{00DE}"),
        ("thorn;", "\u{00FE}"),
        ("thorn", "\u{00FE}"),
        ("tilde;", "\u{02DC}"),
        ("times;", "\u{00D7}"),
        ("times", "\u{00D7}"),
        ("trade;", "\u{2122}"),
        ("Uacute;", "\u{00DA}"),
        ("Uacute", "\u{00DA}"),
        ("uacute;", "\u{00FA}"),
        ("uacute", "\u{00FA}"),
        ("uArr;", "\u{21D1}"),
        ("uarr;", "\u{2191}"),
        ("Ucirc;", "\u{00DB}"),
        ("Ucirc", "\u{00DB}"),
        ("ucirc;", "\u{00FB}"),
        ("ucirc", "\u{00FB}"),
        ("Ugrave;", "\u{00D9}"),
        ("Ugrave", "\u{00D9}"),
        ("ugrave;", "\u{00F9}"),
        ("ugrave", "\u{00F9}"),
        ("uml;", "\u{00A8}"),
        ("uml", "\u{00A8}"),
        ("upsih;", "\u{03D2}"),
        ("Upsilon;", "\u{03A5}"),
        ("upsilon;", "\u{03C5}"),
        ("Uuml;", "\u{00DC}"),
        ("Uuml", "\u{00DC}"),
        ("uuml;", "\u{00FC}"),
        ("uuml", "\u{00FC}"),
        ("weierp;", "\u{2118}"),
        ("Xi;", "\u{039E}"),
        ("xi;", "\u{03BE}"),
        ("Yacute;", "\u{00DD}"),
        ("Yacute", "\u{00DD}"),
        ("yacute;", "\u{00FD}"),
        ("yacute", "\u{00FD}"),
        ("yen;", "\u{00A5}"),
        ("yen", "\u{00A5}"),
        ("Yuml;", "\u{0178}"),
        ("yuml;", "\u{00FF}"),
        ("yuml", "\u{00FF}"),
        ("Zeta;", "\u{0396}"),
        ("zeta;", "\u{03B6}"),
        ("zwj;", "\u{200D}"),
        ("zwnj;", "\u{200C}"),
    ])
});

/// Longest entity name in the table, semicolon included.
pub const MAX_ENTITY_NAME_LEN: usize = 9;

/// Look up an entity by name. `name` includes the trailing `;` if one was
/// present in the input.
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(name).copied()
}
