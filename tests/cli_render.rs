#![allow(missing_docs)]

use std::io::Write;
use std::process::{Command, Output, Stdio};

use manilit_testkit::{fixture_path, stdout_json};

const PROVIDER_LITERAL: &str = "v1alpha1.AWSMachineProviderConfig{
	TypeMeta: v1.TypeMeta{
		Kind: \"AWSMachineProviderConfig\",
		APIVersion: \"awsproviderconfig.k8s.io/v1alpha1\",
	},
	AMI: v1alpha1.AWSResourceReference{
		Filters: []v1alpha1.Filter{
			v1alpha1.Filter{
				Name: \"tag:image_stage\",
				Values: []string{
					\"base\",
				},
			},
		},
	},
	InstanceType: \"m4.xlarge\",
	Tags: []v1alpha1.TagSpecification{
		v1alpha1.TagSpecification{
			Name: \"host-type\",
			Value: \"master\",
		},
	},
	CredentialsSecret: &v1.LocalObjectReference{
			Name: \"aws-credentials\",
		},
	PublicIP: &true,
	Placement: v1alpha1.Placement{
		Region: \"us-east-1\",
	},
}
";

#[test]
fn render_yaml_manifest_prints_pruned_literal() {
	let output = run(&["render", &fixture("machine_provider.yaml"), "--schema", &fixture("awsprovider.schema.yaml")]);

	assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
	assert_eq!(String::from_utf8_lossy(&output.stdout), PROVIDER_LITERAL);
}

#[test]
fn render_reads_stdin_when_no_file_given() {
	let manifest = std::fs::read(fixture_path("machine_provider.yaml")).expect("fixture reads");
	let mut child = Command::new(env!("CARGO_BIN_EXE_manilit"))
		.args(["render", "--schema", &fixture("awsprovider.schema.yaml")])
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
		.expect("command spawns");
	child.stdin.take().expect("stdin is piped").write_all(&manifest).expect("stdin writes");
	let output = child.wait_with_output().expect("command finishes");

	assert!(output.status.success());
	assert_eq!(String::from_utf8_lossy(&output.stdout), PROVIDER_LITERAL);
}

#[test]
fn render_json_manifest_keeps_empty_map_entries() {
	let output = run(&["render", &fixture("credentials_secret.json"), "--schema", &fixture("awsprovider.schema.yaml"), "--json"]);
	assert!(output.status.success());

	let json = stdout_json(&output.stdout);
	assert_eq!(json["type"], "v1.Secret");
	assert_eq!(json["empty"], false);
	assert_eq!(
		json["literal"],
		"v1.Secret{
	TypeMeta: v1.TypeMeta{
		Kind: \"Secret\",
		APIVersion: \"v1\",
	},
	ObjectMeta: v1.ObjectMeta{
		Name: \"aws-credentials-secret\",
		Namespace: \"default\",
	},
	Data: map[string][]uint8{
	\"aws_access_key_id\": []uint8{
		65,
		75,
	},
	\"aws_secret_access_key\": []uint8{nil},
	},
}"
	);
}

#[test]
fn render_type_override_and_space_indent() {
	let output = run(&[
		"render",
		&fixture("credentials_secret.json"),
		"--schema",
		&fixture("awsprovider.schema.yaml"),
		"--type",
		"*v1.ObjectMeta",
		"--indent",
		"2",
	]);

	assert!(output.status.success());
	assert_eq!(
		String::from_utf8_lossy(&output.stdout),
		"&v1.ObjectMeta{\n    Name: \"aws-credentials-secret\",\n    Namespace: \"default\",\n  }\n"
	);
}

#[test]
fn render_unsupported_kind_fails_without_partial_output() {
	let output = run(&["render", &fixture("machine_provider.yaml"), "--schema", &fixture("unsupported.schema.json")]);

	assert!(!output.status.success());
	assert!(output.stdout.is_empty(), "no literal may be printed on failure");
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("unsupported value kind"), "stderr: {stderr}");
}

#[test]
fn render_unregistered_kind_names_api_version() {
	let output = run(&["render", &fixture("unregistered_kind.yaml"), "--schema", &fixture("awsprovider.schema.yaml")]);
	assert!(!output.status.success());
	assert!(output.stdout.is_empty());
	assert!(String::from_utf8_lossy(&output.stderr).contains("apiVersion=\"machine.openshift.io/v1beta1\" kind=\"MachineSet\""));
}

#[test]
fn render_strict_fields_rejects_undeclared_keys() {
	let schema = fixture("awsprovider.schema.yaml");
	let lenient = run(&["render", &fixture("unregistered_kind.yaml"), "--schema", &schema, "--type", "v1.Secret"]);
	assert!(lenient.status.success());

	let strict = run(&["render", &fixture("machine_provider.yaml"), "--schema", &schema, "--type", "v1.Secret", "--strict-fields"]);
	assert!(!strict.status.success());
	assert!(String::from_utf8_lossy(&strict.stderr).contains("unknown field"));
}

#[test]
fn render_rejects_bad_indent() {
	let output = run(&["render", &fixture("machine_provider.yaml"), "--schema", &fixture("awsprovider.schema.yaml"), "--indent", "12"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("invalid indent"));
}

#[test]
fn schema_command_lists_kinds_and_fields() {
	let output = run(&["schema", &fixture("awsprovider.schema.yaml"), "--type", "v1alpha1.Filter"]);
	assert!(output.status.success());

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("types: 9"), "{stdout}");
	assert!(stdout.contains("kinds: 2"), "{stdout}");
	assert!(stdout.contains("  v1/Secret -> v1.Secret"), "{stdout}");
	assert!(stdout.contains("  Values []string key=values"), "{stdout}");
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_manilit")).args(args).output().expect("command executes")
}

fn fixture(name: &str) -> String {
	fixture_path(name).display().to_string()
}
