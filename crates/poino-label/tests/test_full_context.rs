//! Full-context text to label integration tests.

use poino_label::{label_groups_from_full_context, labels_from_full_context};
use poino_spec::Label;
use pretty_assertions::assert_eq;

/// "こんにちは" as a flat (accent 0) five-mora phrase.
const KONNICHIWA: &str = "\
0 1000000 xx^xx-sil+k=o/A:xx+xx+xx/B:xx-xx_xx/C:xx_xx+xx
1000000 1500000 xx^sil-k+o=N/A:-4+1+5/B:xx-xx_xx/C:09_xx+xx
1500000 2500000 sil^k-o+N=n/A:-4+1+5/B:xx-xx_xx/C:09_xx+xx
2500000 3300000 k^o-N+n=i/A:-3+2+4/B:xx-xx_xx/C:09_xx+xx
3300000 3800000 o^N-n+i=ch/A:-2+3+3/B:xx-xx_xx/C:09_xx+xx
3800000 4600000 N^n-i+ch=i/A:-2+3+3/B:xx-xx_xx/C:09_xx+xx
4600000 5400000 n^i-ch+i=w/A:-1+4+2/B:xx-xx_xx/C:09_xx+xx
5400000 6000000 i^ch-i+w=a/A:-1+4+2/B:xx-xx_xx/C:09_xx+xx
6000000 6600000 ch^i-w+a=sil/A:0+5+1/B:xx-xx_xx/C:09_xx+xx
6600000 8000000 i^w-a+sil=xx/A:0+5+1/B:xx-xx_xx/C:09_xx+xx
8000000 9000000 w^a-sil+xx=xx/A:xx+xx+xx/B:xx-xx_xx/C:xx_xx+xx
";

#[test]
fn test_flat_phrase() {
    let labels = labels_from_full_context(KONNICHIWA).unwrap();
    assert_eq!(
        labels,
        vec![
            Label::new("コ", 150.0, 1.0),
            Label::new("ン", 80.0, 1.0),
            Label::new("ニ", 130.0, 1.0),
            Label::new("チ", 140.0, 1.0),
            Label::new("ワ", 200.0, 0.0),
        ]
    );
}

#[test]
fn test_flat_phrase_is_one_group() {
    let groups = label_groups_from_full_context(KONNICHIWA).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 5);
}

#[test]
fn test_devoiced_vowel_is_case_insensitive() {
    let text = "\
0 100000 xx^xx-sil+d=e/A:xx+xx+xx
100000 600000 xx^sil-d+e=s/A:0+1+2
600000 1200000 sil^d-e+s=U/A:0+1+2
1200000 1800000 d^e-s+U=sil/A:1+2+1
1800000 2200000 e^s-U+sil=xx/A:1+2+1
2200000 2300000 s^U-sil+xx=xx/A:xx+xx+xx
";
    let labels = labels_from_full_context(text).unwrap();
    assert_eq!(
        labels,
        vec![Label::new("デ", 110.0, 1.0), Label::new("ス", 100.0, 0.0)]
    );
}

#[test]
fn test_empty_input() {
    assert!(labels_from_full_context("").unwrap().is_empty());
}
