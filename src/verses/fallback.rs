//! Offline verses used when the live API cannot be reached

use crate::models::{Category, Verse};

/// (reference, Arabic text, Saheeh International translation, categories the verse suits)
const OFFLINE_VERSES: &[(&str, &str, &str, &[Category])] = &[
    (
        "Ash-Sharh 94:5",
        "فَإِنَّ مَعَ الْعُسْرِ يُسْرًا",
        "For indeed, with hardship [will be] ease.",
        &[Category::Rest, Category::Hope, Category::Peace],
    ),
    (
        "Al-Baqara 2:153",
        "يَا أَيُّهَا الَّذِينَ آمَنُوا اسْتَعِينُوا بِالصَّبْرِ وَالصَّلَاةِ ۚ إِنَّ اللَّهَ مَعَ الصَّابِرِينَ",
        "O you who have believed, seek help through patience and prayer. Indeed, Allah is with the patient.",
        &[Category::Patience, Category::Strive],
    ),
    (
        "Ar-Ra'd 13:28",
        "الَّذِينَ آمَنُوا وَتَطْمَئِنُّ قُلُوبُهُم بِذِكْرِ اللَّهِ ۗ أَلَا بِذِكْرِ اللَّهِ تَطْمَئِنُّ الْقُلُوبُ",
        "Those who have believed and whose hearts are assured by the remembrance of Allah. Unquestionably, by the remembrance of Allah hearts are assured.",
        &[Category::Tranquility, Category::Peace],
    ),
    (
        "Ibrahim 14:7",
        "وَإِذْ تَأَذَّنَ رَبُّكُمْ لَئِن شَكَرْتُمْ لَأَزِيدَنَّكُمْ ۖ وَلَئِن كَفَرْتُمْ إِنَّ عَذَابِي لَشَدِيدٌ",
        "And [remember] when your Lord proclaimed, 'If you are grateful, I will surely increase you [in favor]; but if you deny, indeed, My punishment is severe.'",
        &[Category::Gratitude, Category::Joy],
    ),
    (
        "Az-Zumar 39:53",
        "قُلْ يَا عِبَادِيَ الَّذِينَ أَسْرَفُوا عَلَىٰ أَنفُسِهِمْ لَا تَقْنَطُوا مِن رَّحْمَةِ اللَّهِ ۚ إِنَّ اللَّهَ يَغْفِرُ الذُّنُوبَ جَمِيعًا ۚ إِنَّهُ هُوَ الْغَفُورُ الرَّحِيمُ",
        "Say, 'O My servants who have transgressed against themselves [by sinning], do not despair of the mercy of Allah. Indeed, Allah forgives all sins. Indeed, it is He who is the Forgiving, the Merciful.'",
        &[Category::Forgiveness, Category::Hope],
    ),
    (
        "Al-Baqara 2:186",
        "وَإِذَا سَأَلَكَ عِبَادِي عَنِّي فَإِنِّي قَرِيبٌ ۖ أُجِيبُ دَعْوَةَ الدَّاعِ إِذَا دَعَانِ",
        "And when My servants ask you, [O Muhammad], concerning Me - indeed I am near. I respond to the invocation of the supplicant when he calls upon Me.",
        &[Category::Companionship, Category::Guidance],
    ),
    (
        "At-Talaaq 65:3",
        "وَمَن يَتَوَكَّلْ عَلَى اللَّهِ فَهُوَ حَسْبُهُ ۚ إِنَّ اللَّهَ بَالِغُ أَمْرِهِ",
        "And whoever relies upon Allah - then He is sufficient for him. Indeed, Allah will accomplish His purpose.",
        &[Category::Protection, Category::Peace],
    ),
    (
        "Aal-i-Imraan 3:190",
        "إِنَّ فِي خَلْقِ السَّمَاوَاتِ وَالْأَرْضِ وَاخْتِلَافِ اللَّيْلِ وَالنَّهَارِ لَآيَاتٍ لِّأُولِي الْأَلْبَابِ",
        "Indeed, in the creation of the heavens and the earth and the alternation of the night and the day are signs for those of understanding.",
        &[Category::Creation],
    ),
];

/// Offline verse for a category; the first entry when nothing matches.
pub fn offline_verse(category: Option<Category>) -> Verse {
    let entry = category
        .and_then(|c| OFFLINE_VERSES.iter().find(|(_, _, _, tags)| tags.contains(&c)))
        .unwrap_or(&OFFLINE_VERSES[0]);

    Verse {
        reference: entry.0.to_string(),
        text: entry.1.to_string(),
        translation: entry.2.to_string(),
    }
}
