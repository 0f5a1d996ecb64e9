//! Canned first-aid advice, keyed by predicted category

/// Lower-cased name of the "no infection" category
pub const NEGATIVE_LABEL: &str = "tidak ispa";

/// Advice for the "no infection" category
pub const GENERAL_ADVICE: &str = "Saran Umum: Tetap jaga pola hidup sehat (nutrisi, olahraga, \
istirahat cukup) dan selalu cuci tangan dengan sabun secara teratur.";

const ADVICE_TABLE: [(&str, &str); 5] = [
    (
        "Bronkitis",
        "Konsultasi dokter sangat disarankan, terutama jika batuk berdahak parah atau sesak napas. \
Istirahat, banyak minum air, hindari iritan (asap). Antibiotik jika bakteri.",
    ),
    (
        "Pneumonia",
        "KONDISI INI SERIUS! SEGERA KE DOKTER/RUMAH SAKIT untuk penanganan medis intensif. \
Jangan mengobati sendiri dan penting untuk istirahat penuh.",
    ),
    (
        "Faringitis",
        "Jika gejala tidak membaik dalam beberapa hari, demam tinggi, atau nyeri sangat parah, \
segera konsultasi ke dokter. Istirahat suara, minum hangat, lozenges.",
    ),
    (
        "Tonsilitis",
        "Jika gejala tidak membaik dalam beberapa hari, demam tinggi, atau nyeri sangat parah, \
segera konsultasi ke dokter. Istirahat, minum hangat, obat pereda nyeri. Antibiotik jika bakteri.",
    ),
    (
        "Rinitis",
        "Jika gejala tidak membaik atau disertai demam tinggi, segera konsultasi ke dokter. \
Istirahat, minum cukup air, bilas hidung dengan saline, antihistamin jika alergi.",
    ),
];

/// Case-insensitive check for the "no infection" category
pub fn is_negative(label: &str) -> bool {
    label.to_lowercase() == NEGATIVE_LABEL
}

/// Advice text for a category; unmapped categories get a generic referral
pub fn advice_for(label: &str) -> String {
    if is_negative(label) {
        return GENERAL_ADVICE.to_string();
    }

    ADVICE_TABLE
        .iter()
        .find(|(key, _)| *key == label)
        .map(|(_, text)| text.to_string())
        .unwrap_or_else(|| {
            format!(
                "Prediksi Anda adalah {}. Disarankan untuk segera berkonsultasi dengan tenaga medis \
untuk prediksi dan penanganan lebih lanjut.",
                label
            )
        })
}
