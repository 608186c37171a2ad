use fulfillment_rs::sequencer::EventKind;
use fulfillment_rs::{FulfillmentError, SimulationConfig, run, run_file};
use std::io::Write;

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = "\
CustomerOrder 0900 Ann 2 0
CustomerOrder 0902 Ben 3 0
CustomerOrder 0903 Cat 0 4
PrintWorkerAssignmentList 0904
this line is not a command
PrintAvailableWorkerList 0910
CustomerOrder 0911 Dan 1 1
PrintMaxFulfillmentTime 0930
";

    fn write_script(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    // --- Full run over a file ---

    #[test]
    fn test_run_file_produces_sorted_log() {
        let file = write_script(SCRIPT);
        let report = run_file(file.path(), SimulationConfig::default()).unwrap();

        let lines: Vec<String> = report.lines().collect();
        assert_eq!(
            lines,
            vec![
                "CustomerOrder 0900 Ann 2 0",
                "CustomerOrder 0902 Ben 3 0",
                "CustomerOrder 0903 Cat 0 4",
                "WorkerAssignmentList 0904 Alice:Ann,Ben Bob:Cat",
                "WorkerAssignment 0907 Alice Ann,Ben",
                "WorkerAssignment 0908 Bob Cat",
                "AvailableWorkerList 0910 Carol David Emily Alice Bob",
                "CustomerOrder 0911 Dan 1 1",
                "WorkerAssignment 0916 Carol Dan",
                "OrderCompletion 0922 Ann,Ben",
                "OrderCompletion 0922 Cat",
                "MaxFulfillmentTime 0930 22",
                "OrderCompletion 0933 Dan",
            ]
        );
        assert_eq!(report.lines_processed, 8);
        assert_eq!(report.lines_rejected, 1);
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let err = run_file("/no/such/commands.txt", SimulationConfig::default()).unwrap_err();
        assert!(matches!(err, FulfillmentError::Input { .. }));
        assert!(err.to_string().contains("/no/such/commands.txt"));
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let config = SimulationConfig::default().with_workers(Vec::<String>::new());
        let err = run("".as_bytes(), config).unwrap_err();
        assert!(matches!(err, FulfillmentError::Config(_)));
    }

    #[test]
    fn test_empty_input_produces_empty_log() {
        let report = run("".as_bytes(), SimulationConfig::default()).unwrap();
        assert!(report.events.is_empty());
        assert_eq!(report.max_fulfillment_minutes, 0);
    }

    // --- Configuration overrides ---

    #[test]
    fn test_custom_roster_and_capacity() {
        let config = SimulationConfig::default()
            .with_workers(["Xi", "Yo"])
            .with_bundle_capacity(3);
        let script = "\
CustomerOrder 0900 A 2 0
CustomerOrder 0901 B 2 0
CustomerOrder 0901 C 1 0
PrintWorkerAssignmentList 0902
";
        let report = run(script.as_bytes(), config).unwrap();
        let listing = report
            .events
            .iter()
            .find(|e| e.kind == EventKind::WorkerAssignmentList)
            .unwrap();
        assert_eq!(listing.payload, "Xi:A,C Yo:B");
    }

    #[test]
    fn test_every_order_is_completed_exactly_once() {
        let mut script = String::new();
        for i in 0..40u32 {
            let minute = i % 60;
            script.push_str(&format!("CustomerOrder 10{minute:02} C{i} {} {}\n", i % 5, i % 2));
            if i % 9 == 0 {
                script.push_str(&format!("PrintAvailableWorkerList 10{minute:02}\n"));
            }
        }
        let report = run(script.as_bytes(), SimulationConfig::default()).unwrap();

        let mut completed: Vec<String> = report
            .events
            .iter()
            .filter(|e| e.kind == EventKind::OrderCompletion)
            .flat_map(|e| e.payload.split(',').map(String::from).collect::<Vec<_>>())
            .collect();
        completed.sort();
        let mut expected: Vec<String> = (0..40).map(|i| format!("C{i}")).collect();
        expected.sort();
        assert_eq!(completed, expected);

        let assignments = report
            .events
            .iter()
            .filter(|e| e.kind == EventKind::WorkerAssignment)
            .count();
        let completions = report
            .events
            .iter()
            .filter(|e| e.kind == EventKind::OrderCompletion)
            .count();
        assert_eq!(assignments, completions);
    }
}
