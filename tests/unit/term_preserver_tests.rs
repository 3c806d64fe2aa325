/*!
 * Tests for technical-term protection and restoration
 */

use cvetrans::term_preserver::TermPreserver;

#[test]
fn test_protect_thenRestore_shouldBeIdentity() {
    let preserver = TermPreserver::new();
    let original = "VMware ESXi 7.0.3 and VMware vCenter Server are affected by CVE-2025-41225; \
see https://support.vmware.com/advisories for details.";

    let (protected, map) = preserver.protect(original);
    assert_ne!(protected, original);

    let restoration = preserver.restore(&protected, &map);
    assert_eq!(restoration.text, original);
    assert!(!restoration.is_partial());
}

#[test]
fn test_protect_withAdjacentProductAndVersion_shouldYieldOneToken() {
    let preserver = TermPreserver::new();
    let (protected, map) = preserver.protect("VMware ESXi 7.0.3 contains a vulnerability.");

    assert_eq!(map.len(), 1);
    assert_eq!(map.original_for("[KEEP:0001]"), Some("VMware ESXi 7.0.3"));
    assert!(protected.starts_with("[KEEP:0001]"));
    assert!(!protected.contains("7.0.3"));
}

#[test]
fn test_protect_shouldNumberTokensLeftToRight() {
    let preserver = TermPreserver::new();
    let (_, map) = preserver.protect(
        "VMware ESXi 7.0.3 contains a critical vulnerability CVE-2025-41225 per VMSA-2025-0010.",
    );

    let entries: Vec<_> = map.entries().collect();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].token, "[KEEP:0001]");
    assert_eq!(entries[0].original, "VMware ESXi 7.0.3");
    assert_eq!(entries[1].token, "[KEEP:0002]");
    assert_eq!(entries[1].original, "CVE-2025-41225");
    assert_eq!(entries[2].token, "[KEEP:0003]");
    assert_eq!(entries[2].original, "VMSA-2025-0010");
}

#[test]
fn test_protect_withManyTerms_shouldKeepTokensUniqueAndNonOverlapping() {
    let preserver = TermPreserver::new();
    let text = (1..=12)
        .map(|i| format!("CVE-2025-4{:04}", i))
        .collect::<Vec<_>>()
        .join(" and ");

    let (protected, map) = preserver.protect(&text);
    assert_eq!(map.len(), 12);

    let tokens: Vec<&str> = map.entries().map(|e| e.token.as_str()).collect();
    for (i, token) in tokens.iter().enumerate() {
        // each token appears exactly once in the protected text
        assert_eq!(protected.matches(token).count(), 1, "token {token}");
        // no token is a substring of another
        for (j, other) in tokens.iter().enumerate() {
            if i != j {
                assert!(!other.contains(token));
            }
        }
    }
}

#[test]
fn test_protect_withScoreRange_shouldNotSplitIntoVersions() {
    let preserver = TermPreserver::new();
    let terms = preserver.extract_terms("CVSSv3 base scores fall in the 7.1-8.9 range.");
    assert!(terms.contains(&"7.1-8.9".to_string()));
    assert!(!terms.contains(&"7.1".to_string()));
    assert!(!terms.contains(&"8.9".to_string()));
}

#[test]
fn test_extractTerms_withGenericIdentifiers_shouldDetectEachKind() {
    let preserver = TermPreserver::new();
    let text = "Contact security@vmware.com or visit https://vmware.com/security. \
The host 192.168.10.5 exposes port 443; the patch vmware-patch.zip has hash \
d41d8cd98f00b204e9800998ecf8427e and updates HKEY_LOCAL_MACHINE\\SOFTWARE\\VMware \
plus /etc/vmware/config.";

    let terms = preserver.extract_terms(text);
    assert!(terms.iter().any(|t| t == "security@vmware.com"));
    assert!(terms.iter().any(|t| t.starts_with("https://vmware.com/security")));
    assert!(terms.iter().any(|t| t == "192.168.10.5"));
    assert!(terms.iter().any(|t| t == "port 443"));
    assert!(terms.iter().any(|t| t == "vmware-patch.zip"));
    assert!(terms.iter().any(|t| t == "d41d8cd98f00b204e9800998ecf8427e"));
    assert!(terms.iter().any(|t| t.starts_with("HKEY_LOCAL_MACHINE\\")));
    assert!(terms.iter().any(|t| t == "/etc/vmware/config"));
}

#[test]
fn test_restore_withReorderedAndRepeatedTokens_shouldReplaceAll() {
    let preserver = TermPreserver::new();
    let (_, map) =
        preserver.protect("CVE-2025-41225 affects VMware ESXi 7.0.3 in all deployments.");

    // translation reordered the tokens and repeated the first
    let translated = "[KEEP:0002]は[KEEP:0001]の影響を受けます。[KEEP:0001]を参照。";
    let restoration = preserver.restore(translated, &map);

    assert!(!restoration.is_partial());
    assert_eq!(
        restoration.text,
        "VMware ESXi 7.0.3はCVE-2025-41225の影響を受けます。CVE-2025-41225を参照。"
    );
}

#[test]
fn test_restore_withMissingToken_shouldFlagPartialWithoutFabricating() {
    let preserver = TermPreserver::new();
    let (_, map) =
        preserver.protect("CVE-2025-41225 affects VMware ESXi 7.0.3 in all deployments.");

    let translated = "[KEEP:0002]は脆弱性の影響を受けます。";
    let restoration = preserver.restore(translated, &map);

    assert!(restoration.is_partial());
    assert_eq!(restoration.missing_tokens, vec!["[KEEP:0001]".to_string()]);
    // the missing term is not injected anywhere
    assert!(!restoration.text.contains("CVE-2025-41225"));
    assert!(restoration.text.contains("VMware ESXi 7.0.3"));
}

#[test]
fn test_verifyPreservation_shouldRequireEveryTermVerbatim() {
    let preserver = TermPreserver::new();
    let original = "CVE-2025-41225 affects VMware ESXi 7.0.3.";

    assert!(preserver.verify_preservation(
        original,
        "VMware ESXi 7.0.3はCVE-2025-41225の影響を受けます。"
    ));
    assert!(!preserver.verify_preservation(
        original,
        "VMware ESXi 7.0.3は脆弱性の影響を受けます。"
    ));
}

#[test]
fn test_protect_withCveId_shouldNotBeClaimedByAdvisoryPattern() {
    let preserver = TermPreserver::new();
    let (_, map) = preserver.protect("Tracked as CVE-2025-41225.");

    let entries: Vec<_> = map.entries().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].original, "CVE-2025-41225");
    assert_eq!(entries[0].category.to_string(), "cve_id");
}

#[test]
fn test_protect_withNoTechnicalTerms_shouldReturnTextUnchanged() {
    let preserver = TermPreserver::new();
    let text = "Customers should review the remediation guidance carefully.";
    let (protected, map) = preserver.protect(text);

    assert_eq!(protected, text);
    assert!(map.is_empty());
}
