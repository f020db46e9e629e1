#[cfg(test)]
mod integration_tests {

    use crate::{
        Normalizer, Operation, RemoveSymbols, RemoveWhitespace, ToFullWidth, check_availability,
        is_valid_phone_number,
    };
    use std::{sync::Arc, thread};

    #[test]
    fn search_key_pipeline() {
        let normalizer = Normalizer::builder()
            .add_stage(RemoveSymbols)
            .add_stage(RemoveWhitespace)
            .build();

        let input = "【新品】 ＡＢＣ－１２３ 測試！";
        assert_eq!(normalizer.normalize(Some(input)).unwrap(), "新品ABC123測試");
    }

    #[test]
    fn display_pipeline_widens_after_cleanup() {
        let normalizer = Normalizer::builder()
            .add_stage(RemoveWhitespace)
            .add_stage(ToFullWidth)
            .build();
        assert_eq!(
            normalizer.normalize(Some("Room 101, 台北")).unwrap(),
            "Ｒｏｏｍ１０１，台北"
        );
    }

    #[test]
    fn phone_cleanup_before_validation() {
        let normalizer = Normalizer::from_operations([Operation::RemoveWhitespace]);
        let raw = "0968 123 456";
        assert!(!is_valid_phone_number(raw));
        let cleaned = normalizer.normalize_str(raw);
        assert!(is_valid_phone_number(&cleaned));
        assert!(check_availability(&cleaned).is_available());
    }

    #[test]
    fn shared_normalizer_across_threads() {
        let normalizer = Arc::new(Normalizer::from_operations(Operation::ALL));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let normalizer = Arc::clone(&normalizer);
                thread::spawn(move || {
                    let input = format!("item {i}: 測試！");
                    normalizer.normalize(Some(input.as_str())).unwrap().into_owned()
                })
            })
            .collect();

        // NFKC inside RemoveSymbols folds the widened text back to ASCII.
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("item{i}測試"));
        }
    }
}
